//! Roles and the permissions they grant.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{validate_id, Session};
use crate::endpoints::Endpoint;
use crate::enums::{GlobalPermission, Lenient, StationPermission};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

/// Permissions granted on one station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationGrant {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub permissions: Vec<Lenient<StationPermission>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePermissions {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub global: Vec<Lenient<GlobalPermission>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub station: Vec<StationGrant>,
}

impl RolePermissions {
    /// Grant `permission` on `station_id`, merging with an existing grant.
    pub fn grant_station(mut self, station_id: u32, permission: StationPermission) -> Self {
        let permission = Lenient::Known(permission);
        match self.station.iter_mut().find(|g| g.id == station_id) {
            Some(grant) if !grant.permissions.contains(&permission) => {
                grant.permissions.push(permission)
            }
            Some(_) => {}
            None => self.station.push(StationGrant {
                id: station_id,
                permissions: vec![permission],
            }),
        }
        self
    }

    pub fn grant_global(mut self, permission: GlobalPermission) -> Self {
        let permission = Lenient::Known(permission);
        if !self.global.contains(&permission) {
            self.global.push(permission);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        for (i, grant) in self.station.iter().enumerate() {
            validate_id("station", grant.id)?;
            if self.station[..i].iter().any(|g| g.id == grant.id) {
                return Err(Error::client(format!(
                    "station {} is granted permissions twice",
                    grant.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub permissions: RolePermissions,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RolePermissions>,
}

impl RoleFields {
    pub fn new(name: impl Into<String>, permissions: RolePermissions) -> Self {
        Self {
            name: Some(name.into()),
            permissions: Some(permissions),
        }
    }
}

impl Resource for Role {
    type Context = Session;
    type Id = u32;
    const KIND: &'static str = "role";
    const COLLECTION: Endpoint = Endpoint::AdminRoles;
    const ITEM: Endpoint = Endpoint::AdminRole;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for Role {
    type Update = RoleFields;
    const EDITABLE: &'static [&'static str] = &["name", "permissions"];

    fn validate_update(&self, update: &RoleFields) -> Result<()> {
        match &update.permissions {
            Some(permissions) => permissions.validate(),
            None => Ok(()),
        }
    }
}

impl Creatable for Role {
    type New = RoleFields;

    fn validate_new(new: &RoleFields) -> Result<()> {
        if new.name.as_deref().map_or(true, str::is_empty) {
            return Err(Error::client("a new role needs a name"));
        }
        match &new.permissions {
            Some(permissions) => permissions.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::admin::tests::session_with;
    use crate::http::testing::ScriptedTransport;
    use crate::resource::create;

    #[test]
    fn grants_merge_per_station() {
        let permissions = RolePermissions::default()
            .grant_station(1, StationPermission::Media)
            .grant_station(1, StationPermission::Podcasts)
            .grant_station(1, StationPermission::Media)
            .grant_station(2, StationPermission::All)
            .grant_global(GlobalPermission::Logs);
        assert_eq!(permissions.station.len(), 2);
        assert_eq!(permissions.station[0].permissions.len(), 2);
        assert_eq!(
            serde_json::to_value(&permissions).unwrap(),
            json!({
                "global": ["view system logs"],
                "station": [
                    {"id": 1, "permissions": ["manage station media", "manage station podcasts"]},
                    {"id": 2, "permissions": ["administer all"]}
                ]
            })
        );
    }

    #[test]
    fn create_rejects_station_zero() {
        let transport = ScriptedTransport::new();
        let fields = RoleFields::new(
            "Broken",
            RolePermissions {
                station: vec![StationGrant {
                    id: 0,
                    permissions: vec![StationPermission::View.into()],
                }],
                ..Default::default()
            },
        );
        assert!(create::<Role>(&session_with(&transport), &fields).is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn unlisted_permission_survives_decode() {
        let role: Role = serde_json::from_value(json!({
            "id": 1, "name": "x",
            "permissions": {"global": ["fly", "view system logs"], "station": null}
        }))
        .unwrap();
        assert_eq!(
            role.permissions.global,
            vec![Lenient::Unknown(json!("fly")), Lenient::Known(GlobalPermission::Logs)]
        );
        assert!(role.permissions.station.is_empty());

        let granted = role.permissions.grant_global(GlobalPermission::Logs);
        assert_eq!(granted.global.len(), 2);
    }
}
