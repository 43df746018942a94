//! Web hooks fired on station events.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::enums::{Lenient, WebhookTrigger, WebhookType};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Handle, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<Lenient<WebhookType>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_enabled: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub triggers: Vec<Lenient<WebhookTrigger>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub config: Map<String, Value>,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<WebhookType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<Lenient<WebhookTrigger>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl WebhookFields {
    pub fn new(kind: WebhookType, config: Map<String, Value>) -> Self {
        Self {
            kind: Some(kind),
            config: Some(config),
            ..Default::default()
        }
    }

    /// Check the config and triggers against the hook type: the supplied
    /// one, or `current` when the type is not being changed.
    fn validate(&self, current: Option<WebhookType>) -> Result<()> {
        let Some(kind) = self.kind.or(current) else {
            return Ok(());
        };
        if let Some(config) = &self.config {
            kind.validate_config(config)?;
        }
        if let Some(triggers) = &self.triggers {
            if !triggers.is_empty() && !kind.uses_triggers() {
                return Err(Error::client(format!("{kind} webhooks take no triggers")));
            }
            for (i, trigger) in triggers.iter().enumerate() {
                if triggers[..i].contains(trigger) {
                    return Err(Error::client(format!("trigger {trigger} listed twice")));
                }
            }
        }
        Ok(())
    }
}

impl Resource for Webhook {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "webhook";
    const COLLECTION: Endpoint = Endpoint::StationWebhooks;
    const ITEM: Endpoint = Endpoint::StationWebhook;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for Webhook {
    type Update = WebhookFields;
    const EDITABLE: &'static [&'static str] = &["name", "type", "is_enabled", "triggers", "config"];

    fn validate_update(&self, update: &WebhookFields) -> Result<()> {
        let current = self.kind.as_ref().and_then(Lenient::known).copied();
        if let (Some(new_kind), None) = (update.kind, &update.config) {
            if Some(new_kind) != current {
                return Err(Error::client(
                    "changing the webhook type requires a matching config",
                ));
            }
        }
        update.validate(current)
    }
}

impl Creatable for Webhook {
    type New = WebhookFields;

    fn validate_new(new: &WebhookFields) -> Result<()> {
        if new.kind.is_none() || new.config.is_none() {
            return Err(Error::client("a new webhook needs a type and a config"));
        }
        new.validate(None)
    }
}

impl Handle<Webhook> {
    fn current_triggers(&self) -> Result<(Option<WebhookType>, Vec<Lenient<WebhookTrigger>>)> {
        let data = self
            .data()
            .ok_or_else(|| Error::client("webhook has been deleted"))?;
        let kind = data.kind.as_ref().and_then(Lenient::known).copied();
        Ok((kind, data.triggers.clone()))
    }

    /// Fire this hook on one more event.
    pub fn add_trigger(&mut self, trigger: WebhookTrigger) -> Result<Value> {
        let (kind, mut triggers) = self.current_triggers()?;
        if let Some(kind) = kind.filter(|k| !k.uses_triggers()) {
            return Err(Error::client(format!("{kind} webhooks take no triggers")));
        }
        let trigger = Lenient::Known(trigger);
        if triggers.contains(&trigger) {
            return Err(Error::client(format!("trigger {trigger} is already set")));
        }
        triggers.push(trigger);
        self.edit(WebhookFields {
            triggers: Some(triggers),
            ..Default::default()
        })
    }

    /// Stop firing this hook on an event.
    pub fn remove_trigger(&mut self, trigger: WebhookTrigger) -> Result<Value> {
        let (_, mut triggers) = self.current_triggers()?;
        let trigger = Lenient::Known(trigger);
        if !triggers.contains(&trigger) {
            return Err(Error::client(format!("trigger {trigger} is not set")));
        }
        triggers.retain(|t| *t != trigger);
        self.edit(WebhookFields {
            triggers: Some(triggers),
            ..Default::default()
        })
    }
}
