//! Command-line and config wiring tests.

#[cfg(test)]
mod args {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::args::{Args, SinkKind};

    fn parse(line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("warehouse").chain(line.split_whitespace()))
    }

    #[test]
    fn empty_is_default() {
        assert_eq!(parse("").unwrap(), Args::default());
        assert_eq!(Args::default().sink, SinkKind::JsonLines);
    }

    #[test]
    fn all_flags() {
        let a = parse(
            "--config fleet.json --sink csv --out r.csv --ticks 60 --seed 7 --vehicles 12 --tick-ms 250",
        )
        .unwrap();
        assert_eq!(a.config, Some(PathBuf::from("fleet.json")));
        assert_eq!(a.sink, SinkKind::Csv);
        assert_eq!(a.out, Some(PathBuf::from("r.csv")));
        assert_eq!(a.ticks, Some(60));
        assert_eq!(a.seed, Some(7));
        assert_eq!(a.vehicles, Some(12));
        assert_eq!(a.tick_ms, Some(250));
    }

    #[test]
    fn short_flags_and_aliases() {
        let a = parse("-n 3 -t 10 -s none --print-config").unwrap();
        assert_eq!(a.vehicles, Some(3));
        assert_eq!(a.ticks, Some(10));
        assert_eq!(a.sink, SinkKind::Null);
        assert!(a.print_config);
        assert_eq!(parse("-s json").unwrap().sink, SinkKind::JsonLines);
        assert_eq!(parse("-s jsonl").unwrap().sink, SinkKind::JsonLines);
    }

    #[test]
    fn missing_value_rejected() {
        assert!(parse("--ticks").is_err());
    }

    #[test]
    fn bad_number_rejected() {
        assert!(parse("--vehicles many").is_err());
    }

    #[test]
    fn unknown_flag_and_sink_rejected() {
        assert!(parse("--turbo").is_err());
        assert!(parse("--sink kafka").is_err());
    }

    #[test]
    fn help_is_generated() {
        let err = parse("--help").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::args::{Args, SinkKind};
    use crate::{load_config, open_sink};

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "vehicles": 2, "seed": 1, "profile": "conservative" }}"#).unwrap();

        let args = Args {
            config:   Some(file.path().to_path_buf()),
            vehicles: Some(9),
            ticks:    Some(30),
            ..Default::default()
        };
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.vehicles, 9);
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.max_ticks, Some(30));
        assert_eq!(cfg.step_params().charging_threshold, 90.0);
    }

    #[test]
    fn invalid_override_rejected() {
        let args = Args { vehicles: Some(0), ..Default::default() };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn shipped_sample_config_is_valid() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fleet.json");
        let args = Args { config: Some(path), ..Default::default() };
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.channels.len(), 6);
    }

    #[test]
    fn csv_sink_needs_out() {
        let args = Args { sink: SinkKind::Csv, ..Default::default() };
        assert!(open_sink(&args).is_err());

        let dir = tempfile::tempdir().unwrap();
        let args = Args { sink: SinkKind::Csv, out: Some(dir.path().join("r.csv")), ..Default::default() };
        assert_eq!(open_sink(&args).unwrap().kind(), "csv");
    }
}
