/// Knobs of a [`crate::Dataset`] that are not part of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Abort a TriG parse on the first statement group the Turtle grammar
    /// rejects, instead of dropping the group and carrying on.
    pub strict_trig: bool,
    /// Indent JSON-LD output with two spaces.
    pub pretty_json: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            strict_trig: false,
            pretty_json: true,
        }
    }
}

impl DatasetConfig {
    pub fn strict() -> Self {
        DatasetConfig {
            strict_trig: true,
            ..Default::default()
        }
    }

    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }
}

#[cfg(test)]
mod test {
    use super::DatasetConfig;

    #[test]
    fn builder_test() {
        let config = DatasetConfig::strict().with_pretty_json(false);
        assert!(config.strict_trig);
        assert!(!config.pretty_json);
        assert!(DatasetConfig::default().with_pretty_json(true).pretty_json);
        assert!(!DatasetConfig::default().strict_trig);
    }
}
