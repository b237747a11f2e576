use serde::{Deserialize, Serialize};

use shopforge_core::{ChannelId, Entity};

/// Sales channel a product can be listed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub slug: String,
    pub name: String,
}

impl Channel {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ChannelId::new(),
            slug: slug.into(),
            name: name.into(),
        }
    }
}

impl Entity for Channel {
    type Id = ChannelId;

    fn id(&self) -> &ChannelId {
        &self.id
    }
}

/// A payload node paired with the channel scope it was resolved under.
///
/// Variant create/update is channel-agnostic, so its payload carries
/// `channel_slug: None`; channel-scoped queries would fill the slug in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelContext<T> {
    pub node: T,
    pub channel_slug: Option<String>,
}

impl<T> ChannelContext<T> {
    pub fn new(node: T, channel_slug: Option<String>) -> Self {
        Self { node, channel_slug }
    }

    /// Wrap a node outside any channel scope.
    pub fn channel_agnostic(node: T) -> Self {
        Self {
            node,
            channel_slug: None,
        }
    }
}
