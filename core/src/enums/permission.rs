use super::string_enum;

string_enum! {
    /// Permission granted across the whole installation.
    pub enum GlobalPermission ("global permission") {
        All => "administer all",
        Logs => "view system logs",
        Settings => "administer settings",
        ApiKeys => "administer api keys",
        Stations => "administer stations",
        CustomFields => "administer custom fields",
        Backups => "administer backups",
        StorageLocations => "administer storage locations",
    }
}

string_enum! {
    /// Permission granted on one station.
    pub enum StationPermission ("station permission") {
        All => "administer all",
        View => "view station management",
        Reports => "view station reports",
        Logs => "view station logs",
        Profile => "manage station profile",
        Broadcasting => "manage station broadcasting",
        Streamers => "manage station streamers",
        MountPoints => "manage station mounts",
        Podcasts => "manage station podcasts",
        Automation => "manage station automation",
        WebHooks => "manage station web hooks",
        Media => "manage station media",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_and_station_sets_are_distinct() {
        assert!("manage station media".parse::<GlobalPermission>().is_err());
        assert_eq!(
            "manage station media".parse::<StationPermission>().unwrap(),
            StationPermission::Media
        );
        assert_eq!(
            "administer backups".parse::<GlobalPermission>().unwrap(),
            GlobalPermission::Backups
        );
    }

    #[test]
    fn names_contain_spaces_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&StationPermission::WebHooks).unwrap(),
            "\"manage station web hooks\""
        );
    }
}
