//! XML request bodies for the publisher api.
//!
//! Every write action has its own [`XmlDocument`] variant. A variant knows its
//! root element and which of its fields render as `<name id=".."/>`
//! references instead of text children, so nothing about the layout is
//! inferred from the data.
use std::fmt::{Debug, Formatter};

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use yudu_publisher_core::{Error, Result};

use super::constants::XML_NAMESPACE;

/// Ordered name to value mapping used by the mapping driven documents.
///
/// Insertion order is kept because it decides element order, and element
/// order is covered by the signature. Inserting an existing name replaces
/// its value in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    /// Insert a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Fields {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

/// One child of a document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// `<name>value</name>`
    Text {
        /// Element name.
        name: String,
        /// Text content, `<`, `>` and `&` are escaped on write.
        value: String,
    },
    /// `<name id="id"/>`
    Reference {
        /// Element name.
        name: String,
        /// Referenced entity id.
        id: String,
    },
    /// `<name>children</name>`
    Container {
        /// Element name.
        name: String,
        /// Nested nodes in output order.
        children: Vec<XmlNode>,
    },
}

impl XmlNode {
    /// Build a text node.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        XmlNode::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build a reference node.
    pub fn reference(name: impl Into<String>, id: impl Into<String>) -> Self {
        XmlNode::Reference {
            name: name.into(),
            id: id.into(),
        }
    }

    fn write(&self, w: &mut Writer<Vec<u8>>) -> Result<()> {
        match self {
            XmlNode::Text { name, value } => {
                write_event(w, Event::Start(BytesStart::new(name.as_str())))?;
                if !value.is_empty() {
                    let text = BytesText::from_escaped(partial_escape(value.as_str()));
                    write_event(w, Event::Text(text))?;
                }
                write_event(w, Event::End(BytesEnd::new(name.as_str())))
            }
            XmlNode::Reference { name, id } => {
                let mut elem = BytesStart::new(name.as_str());
                elem.push_attribute(("id", id.as_str()));
                write_event(w, Event::Empty(elem))
            }
            XmlNode::Container { name, children } => {
                if children.is_empty() {
                    return write_event(w, Event::Empty(BytesStart::new(name.as_str())));
                }
                write_event(w, Event::Start(BytesStart::new(name.as_str())))?;
                for child in children {
                    child.write(w)?;
                }
                write_event(w, Event::End(BytesEnd::new(name.as_str())))
            }
        }
    }
}

/// Push notification sent to a set of readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetedNotification {
    /// Publication node the notification belongs to.
    pub node_id: String,
    /// Notification body.
    pub message: String,
    /// Notification title.
    pub title: String,
    /// Usernames of first party subscribers.
    pub subscribers: Vec<String>,
    /// Tokens of third party subscribers.
    pub third_party_subscribers: Vec<String>,
    /// Optional delivery priority.
    pub priority: Option<String>,
    /// Deliver without sound when `true`.
    pub disable_sound: Option<bool>,
}

impl TargetedNotification {
    fn nodes(&self) -> Vec<XmlNode> {
        let subscribers = self
            .subscribers
            .iter()
            .map(|v| XmlNode::text("subscriberUsername", v.as_str()))
            .chain(
                self.third_party_subscribers
                    .iter()
                    .map(|v| XmlNode::text("thirdPartySubscriberToken", v.as_str())),
            )
            .collect();

        let mut nodes = vec![
            XmlNode::text("nodeId", self.node_id.as_str()),
            XmlNode::text("message", self.message.as_str()),
            XmlNode::text("title", self.title.as_str()),
            XmlNode::Container {
                name: "subscribers".to_string(),
                children: subscribers,
            },
        ];
        if let Some(priority) = &self.priority {
            nodes.push(XmlNode::text("priority", priority.as_str()));
        }
        if let Some(disable_sound) = self.disable_sound {
            nodes.push(XmlNode::text("disableSound", disable_sound.to_string()));
        }
        nodes
    }
}

/// Body of a publisher write request.
///
/// ```
/// use yudu_publisher_api::{Fields, XmlDocument};
///
/// let doc = XmlDocument::CreatePermission(Fields::from([
///     ("reader", "12345"),
///     ("edition", "64256"),
/// ]));
/// assert_eq!(
///     doc.to_xml().unwrap(),
///     "<?xml version=\"1.0\"?>\n\
///      <permission xmlns=\"http://schema.yudu.com\">\
///      <reader id=\"12345\"/><edition id=\"64256\"/></permission>\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlDocument {
    /// `<reader>`, every field as text.
    CreateReader(Fields),
    /// `<reader id="..">`, every field as text.
    UpdateReader {
        /// Reader id.
        id: String,
        /// Fields to change.
        fields: Fields,
    },
    /// `<permission>`, every field as a reference.
    CreatePermission(Fields),
    /// `<permission id="..">`, every field as text.
    UpdatePermission {
        /// Permission id.
        id: String,
        /// Fields to change.
        fields: Fields,
    },
    /// `<subscriptionPeriod>` with `reader` and `subscription` references,
    /// then `startDate` and an optional `expiryDate`, whatever the input order.
    CreateSubscriptionPeriod(Fields),
    /// `<subscriptionPeriod id="..">`, every field as text.
    UpdateSubscriptionPeriod {
        /// Subscription period id.
        id: String,
        /// Fields to change.
        fields: Fields,
    },
    /// `<authentication><password>..</password></authentication>`
    AuthenticatePassword {
        /// Password to check.
        password: String,
    },
    /// `<authToken><key>..</key></authToken>`
    CreateToken {
        /// Key the token is issued for.
        key: String,
    },
    /// `<targetedNotification>`
    TargetedNotification(TargetedNotification),
    /// `<category>`, every field as text.
    Category(Fields),
    /// `<categoryEdition>`, every field as text.
    CategoryEdition(Fields),
    /// `<thirdPartySubscriber>`, every field as text.
    ThirdPartySubscriber(Fields),
}

impl XmlDocument {
    /// Name of the root element.
    pub fn root_name(&self) -> &'static str {
        match self {
            XmlDocument::CreateReader(_) | XmlDocument::UpdateReader { .. } => "reader",
            XmlDocument::CreatePermission(_) | XmlDocument::UpdatePermission { .. } => {
                "permission"
            }
            XmlDocument::CreateSubscriptionPeriod(_)
            | XmlDocument::UpdateSubscriptionPeriod { .. } => "subscriptionPeriod",
            XmlDocument::AuthenticatePassword { .. } => "authentication",
            XmlDocument::CreateToken { .. } => "authToken",
            XmlDocument::TargetedNotification(_) => "targetedNotification",
            XmlDocument::Category(_) => "category",
            XmlDocument::CategoryEdition(_) => "categoryEdition",
            XmlDocument::ThirdPartySubscriber(_) => "thirdPartySubscriber",
        }
    }

    /// The `id` attribute of the root element, set for updates.
    pub fn root_id(&self) -> Option<&str> {
        match self {
            XmlDocument::UpdateReader { id, .. }
            | XmlDocument::UpdatePermission { id, .. }
            | XmlDocument::UpdateSubscriptionPeriod { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    /// Children of the root element in output order.
    ///
    /// Missing fields are left out, nothing is validated here.
    pub fn nodes(&self) -> Vec<XmlNode> {
        match self {
            XmlDocument::CreateReader(fields)
            | XmlDocument::UpdateReader { fields, .. }
            | XmlDocument::UpdatePermission { fields, .. }
            | XmlDocument::UpdateSubscriptionPeriod { fields, .. }
            | XmlDocument::Category(fields)
            | XmlDocument::CategoryEdition(fields)
            | XmlDocument::ThirdPartySubscriber(fields) => {
                fields.iter().map(|(k, v)| XmlNode::text(k, v)).collect()
            }
            XmlDocument::CreatePermission(fields) => fields
                .iter()
                .map(|(k, v)| XmlNode::reference(k, v))
                .collect(),
            XmlDocument::CreateSubscriptionPeriod(fields) => {
                let mut nodes = Vec::with_capacity(4);
                if let Some(v) = fields.get("reader") {
                    nodes.push(XmlNode::reference("reader", v));
                }
                if let Some(v) = fields.get("subscription") {
                    nodes.push(XmlNode::reference("subscription", v));
                }
                if let Some(v) = fields.get("startDate") {
                    nodes.push(XmlNode::text("startDate", v));
                }
                match fields.get("expiryDate") {
                    Some(v) if !v.is_empty() => nodes.push(XmlNode::text("expiryDate", v)),
                    _ => {}
                }
                nodes
            }
            XmlDocument::AuthenticatePassword { password } => {
                vec![XmlNode::text("password", password.as_str())]
            }
            XmlDocument::CreateToken { key } => vec![XmlNode::text("key", key.as_str())],
            XmlDocument::TargetedNotification(notification) => notification.nodes(),
        }
    }

    /// Serialize into the exact bytes the signature covers.
    ///
    /// ```text
    /// <?xml version="1.0"?>\n<root xmlns="http://schema.yudu.com"[ id=".."]>...</root>\n
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        let mut w = Writer::new(Vec::new());
        write_event(&mut w, Event::Decl(BytesDecl::new("1.0", None, None)))?;
        w.get_mut().push(b'\n');

        let name = self.root_name();
        let mut root = BytesStart::new(name);
        root.push_attribute(("xmlns", XML_NAMESPACE));
        if let Some(id) = self.root_id() {
            root.push_attribute(("id", id));
        }

        let nodes = self.nodes();
        if nodes.is_empty() {
            write_event(&mut w, Event::Empty(root))?;
        } else {
            write_event(&mut w, Event::Start(root))?;
            for node in &nodes {
                node.write(&mut w)?;
            }
            write_event(&mut w, Event::End(BytesEnd::new(name)))?;
        }
        w.get_mut().push(b'\n');

        String::from_utf8(w.into_inner())
            .map_err(|e| Error::unexpected("serialized xml is not utf-8").with_source(e))
    }
}

fn write_event(w: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    w.write_event(event)
        .map_err(|e| Error::unexpected("failed to write xml event").with_source(e))
}
