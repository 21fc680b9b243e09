//! Line rendering

use crate::entry::Entry;

use super::config::RenderConfig;
use super::fields::extract;
use super::format::FormatSpec;

/// Render one entry as a single line (without the line terminator).
pub fn render(entry: &Entry, spec: &FormatSpec, config: &RenderConfig) -> String {
    spec.fields()
        .iter()
        .map(|&code| extract(code, entry, config))
        .collect::<Vec<_>>()
        .join(config.separator.as_str())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::SystemTime;

    use chrono::{Local, TimeZone};

    use super::*;
    use crate::entry::{DirEntry, FileEntry, HashKind};
    use crate::hash::MemoryHashes;

    fn jan_first() -> SystemTime {
        Local
            .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .single()
            .unwrap()
            .into()
    }

    #[test]
    fn test_render_tsp() {
        let spec = FormatSpec::compile("tsp").unwrap();
        let config = RenderConfig::default();

        let f = Entry::File(FileEntry::new(
            "a",
            10,
            Some(jan_first()),
            Arc::new(MemoryHashes::new()),
        ));
        let d = Entry::Directory(DirEntry::new("b", None));

        assert_eq!(render(&f, &spec, &config), "2020-01-01 00:00:00;10;a");
        assert_eq!(render(&d, &spec, &config), ";0;b/");
    }

    #[test]
    fn test_render_custom_separator() {
        let spec = FormatSpec::compile("hp").unwrap();
        let config = RenderConfig {
            separator: "  ".to_string(),
            ..Default::default()
        };
        let f = Entry::File(FileEntry::new(
            "a",
            1,
            None,
            Arc::new(MemoryHashes::new().with(HashKind::Md5, "7908e352297f0f530b84a756f188baa3")),
        ));
        assert_eq!(
            render(&f, &spec, &config),
            "7908e352297f0f530b84a756f188baa3  a"
        );
    }

    #[test]
    fn test_render_single_field_has_no_separator() {
        let spec = FormatSpec::compile("p").unwrap();
        let d = Entry::Directory(DirEntry::new("dir", None));
        assert_eq!(render(&d, &spec, &RenderConfig::default()), "dir/");
    }

    #[test]
    fn test_render_does_not_escape_separator() {
        let spec = FormatSpec::compile("sp").unwrap();
        let f = Entry::File(FileEntry::new(
            "semi;colon",
            3,
            None,
            Arc::new(MemoryHashes::new()),
        ));
        assert_eq!(render(&f, &spec, &RenderConfig::default()), "3;semi;colon");
    }

    #[test]
    fn test_render_duplicate_codes() {
        let spec = FormatSpec::compile("pp").unwrap();
        let config = RenderConfig {
            separator: ",".to_string(),
            dir_slash: false,
            ..Default::default()
        };
        let d = Entry::Directory(DirEntry::new("x", None));
        assert_eq!(render(&d, &spec, &config), "x,x");
    }
}
