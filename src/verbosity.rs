use tracing::level_filters::LevelFilter;

/// One row of the verbosity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub offset: i64,
    pub name: &'static str,
    pub filter: LevelFilter,
}

/// Offset to level mapping, sorted ascending by offset with unique keys.
///
/// Offsets below the first row resolve to the first row and offsets above
/// the last row resolve to the last row.
pub const LEVELS: [Level; 6] = [
    Level {
        offset: 0,
        name: "off",
        filter: LevelFilter::OFF,
    },
    Level {
        offset: 1,
        name: "error",
        filter: LevelFilter::ERROR,
    },
    Level {
        offset: 2,
        name: "warn",
        filter: LevelFilter::WARN,
    },
    Level {
        offset: 3,
        name: "info",
        filter: LevelFilter::INFO,
    },
    Level {
        offset: 4,
        name: "debug",
        filter: LevelFilter::DEBUG,
    },
    Level {
        offset: 5,
        name: "trace",
        filter: LevelFilter::TRACE,
    },
];

/// Resolves a `verbose - quiet` offset to its level. Never fails.
pub fn resolve(offset: i64) -> Level {
    let first = LEVELS[0];
    let last = LEVELS[LEVELS.len() - 1];
    if offset <= first.offset {
        return first;
    }
    if offset >= last.offset {
        return last;
    }
    // Inside the bounds the table is dense, but fall back to the nearest
    // lower row should a gap ever be introduced.
    LEVELS
        .iter()
        .rev()
        .find(|level| level.offset <= offset)
        .copied()
        .unwrap_or(first)
}

/// Resolves the level for a pair of verbose/quiet counters.
pub fn resolve_counts(verbose: u8, quiet: u8) -> Level {
    resolve(i64::from(verbose) - i64::from(quiet))
}

/// Renders the table as `0 - off|1 - error|...` for help output.
pub fn level_map() -> String {
    LEVELS
        .iter()
        .map(|level| format!("{} - {}", level.offset, level.name))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in LEVELS.windows(2) {
            assert!(pair[0].offset < pair[1].offset);
        }
    }

    #[test]
    fn test_exact_offsets_resolve_to_their_row() {
        for level in LEVELS {
            assert_eq!(resolve(level.offset), level);
        }
    }

    #[test]
    fn test_default_counts_resolve_to_warn() {
        let level = resolve_counts(2, 0);
        assert_eq!(level.name, "warn");
        assert_eq!(level.filter, LevelFilter::WARN);
    }

    #[test]
    fn test_out_of_range_offsets_clamp() {
        assert_eq!(resolve(-1).name, "off");
        assert_eq!(resolve(-1000).name, "off");
        assert_eq!(resolve(6).name, "trace");
        assert_eq!(resolve(1000).name, "trace");
        assert_eq!(resolve(i64::MIN).name, "off");
        assert_eq!(resolve(i64::MAX).name, "trace");
        assert_eq!(resolve_counts(0, 255).name, "off");
        assert_eq!(resolve_counts(255, 0).name, "trace");
    }

    #[test]
    fn test_resolution_is_total() {
        for offset in -1000..=1000 {
            let level = resolve(offset);
            assert!(LEVELS.contains(&level), "offset {offset} left the table");
        }
    }

    #[test]
    fn test_level_map_lists_every_row_in_order() {
        assert_eq!(
            level_map(),
            "0 - off|1 - error|2 - warn|3 - info|4 - debug|5 - trace"
        );
    }
}
