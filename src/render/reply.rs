use serde::Serialize;

pub const COLOR_OKAY: u32 = 0x00FF00;
pub const COLOR_FAIL: u32 = 0xFF0000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich reply: everything a chat client needs to draw an embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<Field>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString, inline: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.to_string(),
            inline,
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reaction {
    Custom { id: u64, name: String },
    Unicode { emoji: String },
}

impl Reaction {
    pub fn unicode(emoji: &str) -> Self {
        Reaction::Unicode {
            emoji: emoji.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self::unicode("❌")
    }
}

/// What a command sends back: one or more pages (more than one means the
/// client should show a paginated menu) and an optional reaction on the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub pages: Vec<Reply>,
    pub reaction: Option<Reaction>,
}

impl Response {
    pub fn single(reply: Reply) -> Self {
        Self {
            pages: vec![reply],
            reaction: None,
        }
    }

    pub fn menu(pages: Vec<Reply>) -> Self {
        Self {
            pages,
            reaction: None,
        }
    }

    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reaction = Some(reaction);
        self
    }

    pub fn is_menu(&self) -> bool {
        self.pages.len() > 1
    }

    pub fn first(&self) -> Option<&Reply> {
        self.pages.first()
    }
}
