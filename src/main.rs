mod analyzers;
mod core;
mod engine;
mod ranking;
mod report;
mod ui;
mod workspace;

use clap::Parser;

use crate::core::error::{LensResult, print_error};
use crate::engine::create_default_engine;
use crate::workspace::RepoReference;

/// Analyze a remote repository with security, style, complexity and
/// documentation analyzers
#[derive(Parser)]
#[command(name = "repolens")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// URL of the repository to analyze (optionally with a /tree/<branch> suffix)
  repo_url: String,

  /// Number of ranked findings to show per analyzer
  #[arg(long, default_value_t = 5)]
  top: usize,

  /// Output the raw report as JSON instead of the human-readable text
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = run(&cli) {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}

fn run(cli: &Cli) -> LensResult<()> {
  let reference = RepoReference::parse(&cli.repo_url);
  eprintln!("📦 Cloning {} ...", reference.base_url);

  let mut engine = create_default_engine();
  engine.show_progress(!cli.json);

  if !cli.json {
    eprintln!("📋 Registered analyzers:");
    for analyzer in engine.analyzers() {
      eprintln!("   • {}: {}", analyzer.name(), analyzer.description());
    }
  }

  let report = engine.run(&reference)?;

  let text = report::render(&cli.repo_url, &report, cli.top);
  if cli.json {
    println!("{}", report.to_json()?);
  } else {
    println!("{}", text);
  }

  let artifact = report::write_artifact(&text)?;
  eprintln!("📄 Report written to {}", artifact.display());

  Ok(())
}
