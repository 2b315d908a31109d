//! Git annotated tag object
//!
//! Only what is needed to peel a tag down to the object it points at is
//! parsed; the tagger and message are kept verbatim.
//!
//! ## Format
//!
//! ```text
//! object <sha>
//! type <object-type>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tag {
    target: ObjectId,
    target_type: ObjectType,
    name: String,
    rest: String,
}

impl Tag {
    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Packable for Tag {
    fn serialize_content(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.display()))
    }
}

impl Unpackable for Tag {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("Invalid tag object: unreadable content")?;
        // only the ASCII header lines are interpreted; the message may be in any encoding
        let content = String::from_utf8_lossy(&bytes);

        let mut lines = content.splitn(4, '\n');
        let target = lines
            .next()
            .and_then(|line| line.strip_prefix("object "))
            .context("Invalid tag object: missing object line")?;
        let target_type = lines
            .next()
            .and_then(|line| line.strip_prefix("type "))
            .context("Invalid tag object: missing type line")?;
        let name = lines
            .next()
            .and_then(|line| line.strip_prefix("tag "))
            .context("Invalid tag object: missing tag line")?;

        Ok(Self::new(
            ObjectId::try_parse(target.to_string())?,
            ObjectType::try_from(target_type)?,
            name.to_string(),
            lines.next().unwrap_or_default().to_string(),
        ))
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }

    fn display(&self) -> String {
        format!(
            "object {}\ntype {}\ntag {}\n{}",
            self.target, self.target_type, self.name, self.rest
        )
    }
}
