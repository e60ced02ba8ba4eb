use chrono::{DateTime, Utc};

/// Default accent color for embeds
pub const EMBED_COLOR: u32 = 0x0099FF;

/// One `(name, value, inline)` row of an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// Structured, formatted reply payload
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub timestamp: DateTime<Utc>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: EMBED_COLOR,
            description: None,
            fields: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Plain-text rendering for adapters without embed support
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("== {} ==", self.title);
        if let Some(desc) = &self.description {
            out.push('\n');
            out.push_str(desc);
        }
        for field in &self.fields {
            out.push_str(&format!("\n  {}: {}", field.name, field.value));
        }
        out
    }
}

/// Reply body
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Text(String),
    Embed(Embed),
}

/// A reply to a message or interaction. Write-once, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub body: ReplyBody,
    /// Only visible to the invoking user. Ignored for message replies.
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(text.into()),
            ephemeral: false,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            ephemeral: false,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(s) => Some(s),
            ReplyBody::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match &self.body {
            ReplyBody::Embed(e) => Some(e),
            ReplyBody::Text(_) => None,
        }
    }

    pub fn to_plain_text(&self) -> String {
        match &self.body {
            ReplyBody::Text(s) => s.clone(),
            ReplyBody::Embed(e) => e.to_plain_text(),
        }
    }
}
