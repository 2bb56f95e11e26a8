use shared::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, ContactField::Message)
    }
}

/// Draft contents of the contact form. There is no delivery channel behind
/// it: submission always reports [`SiteError::NotImplemented`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn is_blank(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.field(*field).trim().is_empty())
    }

    pub fn submit(&self) -> Result<(), SiteError> {
        tracing::warn!(
            blank = self.is_blank(),
            "contact form submitted but no submission handler exists"
        );
        Err(SiteError::NotImplemented("contact form submission"))
    }
}
