/// One student as read from a roster file or a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterEntry {
    pub student_name: String,
    pub collaborator_ids: Vec<String>,
}

impl RosterEntry {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            student_name: name.into(),
            ..Self::default()
        }
    }

    /// Build an entry from the fields of one roster record. Every field after
    /// the name is a collaborator id, so `to_record` gives the fields back
    /// unchanged.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = fields.into_iter().map(Into::into);
        let student_name = fields.next().unwrap_or_default();

        Self {
            student_name,
            collaborator_ids: fields.collect(),
        }
    }

    /// Plain-text parse used for folder generation: the name is whatever
    /// precedes the first comma, with surrounding whitespace removed.
    pub fn from_line(line: &str) -> Self {
        let mut parts = line.splitn(2, ',');
        let student_name = parts.next().unwrap_or("").trim().to_string();
        let collaborator_ids = parts
            .next()
            .map(|rest| rest.split(',').map(|id| id.trim().to_string()).collect())
            .unwrap_or_default();

        Self {
            student_name,
            collaborator_ids,
        }
    }

    pub fn has_name(&self) -> bool {
        !self.student_name.is_empty()
    }

    /// The gradebook row: name first, then every collaborator field.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.collaborator_ids.len() + 1);
        record.push(self.student_name.clone());
        record.extend(self.collaborator_ids.iter().cloned());
        record
    }
}
