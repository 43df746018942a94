//! Administration endpoints (`/api/admin/...`).

mod api_key;
mod custom_field;
mod role;
mod settings;
mod station;
mod storage;
mod user;

pub use api_key::ApiKey;
pub use custom_field::{CustomField, CustomFieldFields};
pub use role::{Role, RoleFields, RolePermissions, StationGrant};
pub use settings::{IpSource, PublicTheme, Settings, SettingsUpdate};
pub use station::{AdminStation, BackendType, FrontendType, StationFields};
pub use storage::{StorageAdapter, StorageLocation, StorageLocationFields, StorageType};
pub use user::{validate_locale, User, UserFields};

use serde_json::Value;
use tracing::debug;

use crate::context::{Context, Session};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::resource::{self, succeeded, Creatable, Handle, Resource};
use crate::types::{PermissionCatalogue, ServiceStatus};

/// Entry point for installation-wide administration. Every call needs an
/// API key with the matching global permission.
#[derive(Debug, Clone)]
pub struct Admin {
    session: Session,
}

impl Admin {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn list<T>(&self) -> Result<Vec<Handle<T>>>
    where
        T: Resource<Context = Session>,
    {
        resource::list(&self.session)
    }

    pub fn get_one<T>(&self, id: T::Id) -> Result<Handle<T>>
    where
        T: Resource<Context = Session>,
    {
        resource::fetch(&self.session, id)
    }

    pub fn create<T>(&self, new: &T::New) -> Result<Handle<T>>
    where
        T: Creatable<Context = Session>,
    {
        resource::create(&self.session, new)
    }

    /// Permission names that roles may grant.
    pub fn permissions(&self) -> Result<PermissionCatalogue> {
        let url = self.session.url(Endpoint::AdminPermissions)?;
        self.session.get_as(&url)
    }

    pub fn services(&self) -> Result<Vec<ServiceStatus>> {
        let url = self.session.url(Endpoint::AdminServices)?;
        self.session.get_as(&url)
    }

    pub fn settings(&self) -> Result<Settings> {
        let url = self.session.url(Endpoint::AdminSettings)?;
        self.session.get_as(&url)
    }

    /// Send the supplied fields; `settings` takes them on `"success": true`.
    pub fn update_settings(&self, settings: &mut Settings, update: SettingsUpdate) -> Result<Value> {
        update.validate()?;
        let changes = update.to_body()?;
        let url = self.session.url(Endpoint::AdminSettings)?;
        let body = Value::Object(changes.clone());
        let response = self.session.send(HttpMethod::Put, &url, Some(&body))?;
        if succeeded(&response) {
            debug!(fields = changes.len(), "settings updated");
            settings.apply(changes)?;
        }
        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::error::Error;
    use crate::http::testing::ScriptedTransport;

    pub(crate) fn session_with(transport: &ScriptedTransport) -> Session {
        Session::with_dispatcher(
            "http://radio.test",
            Dispatcher::with_transport(transport.clone(), Some("key".into())),
        )
    }

    #[test]
    fn update_settings_merges_on_success_only() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": false, "message": "nope"}));
        transport.push_json(json!({"success": true}));
        let admin = Admin::new(session_with(&transport));
        let mut settings = Settings {
            instance_name: Some("Old".into()),
            ..Default::default()
        };

        let update = || SettingsUpdate {
            instance_name: Some("New".into()),
            ..Default::default()
        };
        admin.update_settings(&mut settings, update()).unwrap();
        assert_eq!(settings.instance_name.as_deref(), Some("Old"));

        admin.update_settings(&mut settings, update()).unwrap();
        assert_eq!(settings.instance_name.as_deref(), Some("New"));
        assert_eq!(transport.last_body(), json!({"instance_name": "New"}));
        assert_eq!(transport.requests()[1].method, HttpMethod::Put);
        assert_eq!(
            transport.requests()[1].url,
            "http://radio.test/api/admin/settings"
        );
    }

    #[test]
    fn api_keys_are_deleted_by_string_id() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!([{"id": "a1b2c3", "comment": "CI"}]));
        transport.push_json(json!({"success": true}));
        let admin = Admin::new(session_with(&transport));

        let mut keys = admin.list::<ApiKey>().unwrap();
        keys[0].delete().unwrap();
        assert!(keys[0].is_deleted());
        assert_eq!(
            transport.requests()[1].url,
            "http://radio.test/api/admin/api-key/a1b2c3"
        );
    }

    #[test]
    fn permissions_catalogue_decodes() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({
            "global": [{"id": "administer all", "name": "All Permissions"}],
            "station": [{"id": "manage station media", "name": "Manage Station Media"}]
        }));
        let catalogue = Admin::new(session_with(&transport)).permissions().unwrap();
        assert_eq!(catalogue.global[0].id, "administer all");
        assert_eq!(catalogue.station.len(), 1);
    }

    #[test]
    fn admin_calls_without_rights_are_access_denied() {
        let transport = ScriptedTransport::new();
        transport.push(403, "");
        let err = Admin::new(session_with(&transport)).services().unwrap_err();
        assert!(matches!(err, Error::AccessDenied));
    }
}
