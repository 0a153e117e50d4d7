//! A terminal front end for inspecting the demo agents and calling their
//! tools by hand.

#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use csr_agents::core::mortgage::LoanQuoteRequest;
use csr_agents::core::tool::{ToolCall, ToolDefinition};
use csr_agents::{AzureConfig, Demo, Session, SessionBuilder};
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

const BAR_CHAR: &str = "▎";

#[derive(Debug, Parser)]
#[command(
    name = "csr-agents",
    about = "Inspect the demo agents and call their tools",
    after_help = "Examples:\n  csr-agents quote --principal 800000 --rate 7 --years 30\n  \
                  csr-agents tools --demo csr --agent \"Invoicing Agent\"\n  \
                  csr-agents call get_booking_status '{\"booking_id\": 300}'"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Quote the monthly payment of a fixed-rate mortgage")]
    Quote {
        #[arg(long, help = "Amount borrowed, in dollars", allow_negative_numbers = true)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent", allow_negative_numbers = true)]
        rate: f64,
        #[arg(long, help = "Loan term in years")]
        years: u32,
    },
    #[command(about = "List the agents of a demo")]
    Agents {
        #[arg(long, value_enum, default_value_t = Demo::Csr)]
        demo: Demo,
    },
    #[command(about = "Print the tool definitions offered to an agent")]
    Tools {
        #[arg(long, value_enum, default_value_t = Demo::Csr)]
        demo: Demo,
        #[arg(long, help = "Agent name, defaults to the entry agent")]
        agent: Option<String>,
    },
    #[command(about = "Call a tool with JSON arguments")]
    Call {
        #[arg(help = "Tool name, e.g. calculate_mortgage")]
        tool: String,
        #[arg(help = "Arguments as a JSON object", default_value = "{}")]
        arguments: String,
        #[arg(long, value_enum, default_value_t = Demo::Csr)]
        demo: Demo,
    },
    #[command(about = "Print the first user message of a demo")]
    Scenario {
        #[arg(long, value_enum, default_value_t = Demo::Csr)]
        demo: Demo,
        #[arg(long, help = "Seed for the simulated customer")]
        seed: Option<u64>,
    },
    #[command(about = "Show the Azure OpenAI configuration, with secrets redacted")]
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = dotenvy::dotenv() {
        debug!("no .env file loaded: {err}");
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Quote {
            principal,
            rate,
            years,
        } => quote(principal, rate, years),
        Command::Agents { demo } => agents(demo),
        Command::Tools { demo, agent } => tools(demo, agent.as_deref()),
        Command::Call {
            tool,
            arguments,
            demo,
        } => call(demo, tool, &arguments).await,
        Command::Scenario { demo, seed } => scenario(demo, seed),
        Command::Config => config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn quote(principal: f64, rate: f64, years: u32) -> Result<(), String> {
    let quote = LoanQuoteRequest::new(principal, rate, years)
        .quote()
        .map_err(|err| err.to_string())?;
    println!("{}", quote.display.bright_white().bold());
    Ok(())
}

fn agents(demo: Demo) -> Result<(), String> {
    let session = build_session(demo)?;
    for agent in session.roster().agents() {
        let bar = BAR_CHAR.bright_cyan();
        println!("{bar}🤖 {}", agent.name().bright_white().bold());
        println!("{bar}   {}", agent.instructions().dimmed());
        if !agent.tools().is_empty() {
            println!("{bar}   tools: {}", agent.tools().join(", "));
        }
        if !agent.handoffs().is_empty() {
            println!("{bar}   hand-offs: {}", agent.handoffs().join(", "));
        }
        println!(
            "{bar}   tool choice: {:?}, after tools: {:?}",
            agent.tool_choice(),
            agent.tool_use_behavior()
        );
        println!();
    }
    Ok(())
}

fn tools(demo: Demo, agent: Option<&str>) -> Result<(), String> {
    let session = build_session(demo)?;
    let definitions = match agent {
        Some(agent) => session
            .tool_definitions_for(agent)
            .ok_or_else(|| format!("no agent named `{agent}` in the {} demo", demo.name()))?,
        None => session.tool_definitions(),
    };
    let tools: Vec<Value> =
        definitions.iter().map(ToolDefinition::to_function_json).collect();
    let json = serde_json::to_string_pretty(&tools).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

async fn call(demo: Demo, tool: String, arguments: &str) -> Result<(), String> {
    let session = build_session(demo)?;
    let arguments: Value = serde_json::from_str(arguments)
        .map_err(|err| format!("arguments are not valid JSON: {err}"))?;

    let output = session
        .call_tool(ToolCall::new("call_0", tool, arguments))
        .await;
    match output.result {
        Ok(content) => {
            println!("{}🔧 {}", BAR_CHAR.bright_cyan(), content.bright_white());
            Ok(())
        }
        Err(err) => Err(err.to_string()),
    }
}

fn scenario(demo: Demo, seed: Option<u64>) -> Result<(), String> {
    let session = build_session(demo)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    println!(
        "{}👤 {}",
        BAR_CHAR.bright_yellow(),
        session.user_message(&mut rng).bright_white()
    );
    println!(
        "{}   to {}",
        BAR_CHAR.bright_yellow(),
        session.entry_agent().name().bold()
    );
    Ok(())
}

fn config() -> Result<(), String> {
    let config = AzureConfig::from_env().map_err(|err| err.to_string())?;
    println!("{config:#?}");
    println!("{}", config.chat_completions_url(None).bright_white());
    Ok(())
}

fn build_session(demo: Demo) -> Result<Session, String> {
    SessionBuilder::for_demo(demo)
        .build()
        .map_err(|err| err.to_string())
}
