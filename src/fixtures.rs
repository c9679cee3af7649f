#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use serde::Deserialize;

    use crate::field::Field;
    use crate::kind::Kind;
    use crate::schema::Schema;

    /// An argument vector under the entry-point contract: process path,
    /// script name `test`, then the given tokens.
    pub fn argv(rest: &[&str]) -> Vec<String> {
        let mut tokens = vec![String::new(), "test".to_string()];
        tokens.extend(rest.iter().map(|s| s.to_string()));
        tokens
    }

    pub fn envmap(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// The canonical multi-source schema: prefix `config`, one field `what`.
    /// The rc name is pinned to a file that does not exist so tests stay
    /// hermetic regardless of the machine they run on.
    pub fn config_schema(kind: Kind) -> Schema {
        Schema::builder()
            .prefix("config")
            .rc_file(".argrc-absentrc")
            .field(Field::new("what").kind(kind))
            .build()
            .unwrap()
    }

    /// Target struct for typed-extraction tests.
    #[derive(Debug, Deserialize, PartialEq)]
    pub struct ServerOpts {
        pub addr: String,
        pub port: u16,
        pub debug: bool,
        pub tags: Vec<String>,
    }

    #[test]
    fn argv_places_script_name_second() {
        let tokens = argv(&["--what"]);
        assert_eq!(tokens[1], "test");
        assert_eq!(tokens[2], "--what");
    }
}
