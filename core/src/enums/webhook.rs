use serde_json::{Map, Value};

use super::string_enum;
use crate::error::{Error, Result};

string_enum! {
    /// Kind of web hook connector.
    pub enum WebhookType ("webhook type") {
        Generic => "generic",
        Email => "email",
        Tunein => "tunein",
        RadioDe => "radiode",
        GetMeRadio => "getmeradio",
        Discord => "discord",
        Telegram => "telegram",
        GroupMe => "groupme",
        Twitter => "twitter",
        Mastodon => "mastodon",
        GoogleAnalyticsV4 => "google_analytics_v4",
        MatomoAnalytics => "matomo_analytics",
    }
}

impl WebhookType {
    /// Configuration keys a hook of this type must carry.
    pub fn config_keys(&self) -> &'static [&'static str] {
        match self {
            WebhookType::Generic => &[
                "webhook_url",
                "basic_auth_username",
                "basic_auth_password",
                "timeout",
            ],
            WebhookType::Email => &["to", "subject", "message"],
            WebhookType::Tunein => &["station_id", "partner_id", "partner_key"],
            WebhookType::RadioDe => &["broadcastsubdomain", "apikey"],
            WebhookType::GetMeRadio => &["token", "station_id"],
            WebhookType::Discord => &[
                "webhook_url",
                "content",
                "title",
                "description",
                "url",
                "author",
                "thumbnail",
                "footer",
            ],
            WebhookType::Telegram => &["bot_token", "chat_id", "api", "text", "parse_mode"],
            WebhookType::GroupMe => &["bot_id", "api", "text"],
            WebhookType::Twitter => &[
                "consumer_key",
                "consumer_secret",
                "token",
                "token_secret",
                "rate_limit",
                "message",
            ],
            WebhookType::Mastodon => &[
                "instance_url",
                "access_token",
                "rate_limit",
                "visibility",
                "message",
            ],
            WebhookType::GoogleAnalyticsV4 => &["api_secret", "measurement_id"],
            WebhookType::MatomoAnalytics => &["matomo_url", "site_id", "token"],
        }
    }

    /// Whether this type reacts to triggers. Analytics connectors fire on
    /// every listener update and take no trigger list.
    pub fn uses_triggers(&self) -> bool {
        !matches!(
            self,
            WebhookType::GoogleAnalyticsV4 | WebhookType::MatomoAnalytics
        )
    }

    /// Check that `config` carries every key of this type and nothing else.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<()> {
        let expected = self.config_keys();
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|key| !config.contains_key(*key))
            .collect();
        let unknown: Vec<&str> = config
            .keys()
            .map(String::as_str)
            .filter(|key| !expected.contains(key))
            .collect();

        if missing.is_empty() && unknown.is_empty() {
            return Ok(());
        }

        let mut problems = Vec::new();
        if !missing.is_empty() {
            problems.push(format!("missing {}", missing.join(", ")));
        }
        if !unknown.is_empty() {
            problems.push(format!("unknown {}", unknown.join(", ")));
        }
        Err(Error::client(format!(
            "invalid config for {} webhook: {}",
            self,
            problems.join("; ")
        )))
    }
}

string_enum! {
    /// Station event a web hook can fire on.
    pub enum WebhookTrigger ("webhook trigger") {
        SongChanged => "song_changed",
        SongChangedLive => "song_changed_live",
        ListenerGained => "listener_gained",
        ListenerLost => "listener_lost",
        LiveConnect => "live_connect",
        LiveDisconnect => "live_disconnect",
        StationOffline => "station_offline",
        StationOnline => "station_online",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn complete_config_is_accepted() {
        let cfg = config(json!({"to": "ops@example.com", "subject": "Live", "message": "{{ now_playing.song.text }}"}));
        assert!(WebhookType::Email.validate_config(&cfg).is_ok());
    }

    #[test]
    fn missing_and_unknown_keys_are_reported() {
        let cfg = config(json!({"to": "ops@example.com", "cc": "boss@example.com"}));
        let err = WebhookType::Email.validate_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, Error::Client(_)));
        assert!(msg.contains("missing subject, message"), "{msg}");
        assert!(msg.contains("unknown cc"), "{msg}");
    }

    #[test]
    fn type_names_match_the_wire() {
        assert_eq!(
            "google_analytics_v4".parse::<WebhookType>().unwrap(),
            WebhookType::GoogleAnalyticsV4
        );
        assert!("slack".parse::<WebhookType>().is_err());
        assert!(!WebhookType::MatomoAnalytics.uses_triggers());
        assert!(WebhookType::Discord.uses_triggers());
    }

    #[test]
    fn triggers_round_trip_through_serde() {
        let triggers: Vec<WebhookTrigger> =
            serde_json::from_value(json!(["song_changed", "station_offline"])).unwrap();
        assert_eq!(
            triggers,
            vec![WebhookTrigger::SongChanged, WebhookTrigger::StationOffline]
        );
        assert!(serde_json::from_value::<WebhookTrigger>(json!("song_skipped")).is_err());
    }
}
