use tracing_subscriber::EnvFilter;

/// Filter for the given `-v` count. `RUST_LOG` wins when no flag is given.
fn filter(verbose: u8) -> EnvFilter {
    if verbose == 0 {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(directive(verbose))
}

fn directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,guard={level}")
}

pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "warn,guard=warn")]
    #[case(1, "warn,guard=info")]
    #[case(2, "warn,guard=debug")]
    #[case(3, "warn,guard=trace")]
    #[case(7, "warn,guard=trace")]
    fn test_directive(#[case] verbose: u8, #[case] expected: &str) {
        assert_eq!(directive(verbose), expected);
    }
}
