use clap::{Parser, Subcommand, ValueEnum};
use form_adapters::{AttributionChain, JsonFileCatalog, JsonLinesSink};
use form_core::{FieldCatalog, FormSession, StepPartition};
use form_domain::masks::{is_valid_email, normalize_phone, sanitize_email};
use form_domain::{Cnpj, Cpf};
use leadform_rust::logging::init_logging;
use leadform_rust::script::{run_scripted, ScriptedOutcome};
use leadform_rust::{AppConfig, AppError, CONFIG};
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "leadform")]
#[command(about = "Formularios de captación multi-paso")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Activa logs de depuración
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Muestra la división en pasos de un catálogo
    Steps {
        /// Catálogo JSON (por defecto LEADFORM_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Completa el formulario con respuestas JSON y agrega el envío al archivo de salida
    Fill {
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Objeto JSON `{ "campo": valor }`
        #[arg(long)]
        answers: PathBuf,

        /// Archivo JSON-lines de salida (por defecto LEADFORM_SUBMISSIONS_PATH)
        #[arg(long)]
        out: Option<PathBuf>,

        /// URL de la página contenedora, para atribución
        #[arg(long)]
        parent_url: Option<String>,

        #[arg(long)]
        referrer: Option<String>,
    },

    /// Valida y enmascara un valor suelto
    Check {
        kind: CheckKind,
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CheckKind {
    Cpf,
    Cnpj,
    Email,
    Phone,
}

/// Resultado de un comando: 0 ok, 4 bloqueado o inválido.
type CmdResult = Result<u8, AppError>;

async fn cmd_steps(config: &AppConfig, catalog: Option<PathBuf>) -> CmdResult {
    let path = catalog.unwrap_or_else(|| config.catalog_path.clone());
    let fields = JsonFileCatalog::new(&path).load().await?;
    let partition = StepPartition::new(fields);
    println!("{}: {} paso(s)", path.display(), partition.total_steps());
    for step in 1..=partition.total_steps() {
        let ids: Vec<String> = partition.fields_for_step(step)?
                                        .iter()
                                        .map(|f| if f.required { format!("{}*", f.id) } else { f.id.clone() })
                                        .collect();
        println!("  paso {step}: {}", ids.join(", "));
    }
    Ok(0)
}

async fn cmd_fill(config: &AppConfig,
                  catalog: Option<PathBuf>,
                  answers: PathBuf,
                  out: Option<PathBuf>,
                  parent_url: Option<String>,
                  referrer: Option<String>)
                  -> CmdResult {
    let text = tokio::fs::read_to_string(&answers).await?;
    let Value::Object(answers) = serde_json::from_str::<Value>(&text)? else {
        return Err(AppError::Config(format!("{}: se espera un objeto JSON", answers.display())));
    };
    let catalog = JsonFileCatalog::new(catalog.unwrap_or_else(|| config.catalog_path.clone()));
    let out = out.unwrap_or_else(|| config.submissions_path.clone());
    let attribution = AttributionChain::standard(BTreeMap::new(), parent_url, referrer, None).capture();
    debug!("cli:fill attribution={:?}", attribution);

    let engine = form_core::StepEngine::new().with_settings(config.masks.clone());
    let mut session = FormSession::with_engine(catalog, JsonLinesSink::new(&out).with_attribution(attribution), engine);
    match run_scripted(&mut session, &answers).await? {
        ScriptedOutcome::Submitted(payload) => {
            println!("enviado: fingerprint={} -> {}", payload.fingerprint, out.display());
            Ok(0)
        }
        ScriptedOutcome::Blocked { step, missing } => {
            eprintln!("bloqueado en paso {step}: faltan {}", missing.join(", "));
            Ok(4)
        }
    }
}

fn cmd_check(config: &AppConfig, kind: CheckKind, value: &str) -> CmdResult {
    let (shown, ok) = match kind {
        CheckKind::Cpf => match Cpf::parse(value) {
            Ok(cpf) => (cpf.to_string(), true),
            Err(e) => (e.to_string(), false),
        },
        CheckKind::Cnpj => match Cnpj::parse(value) {
            Ok(cnpj) => (cnpj.to_string(), true),
            Err(e) => (e.to_string(), false),
        },
        CheckKind::Email => {
            let email = sanitize_email(value);
            let ok = is_valid_email(&email);
            (email, ok)
        }
        CheckKind::Phone => {
            let phone = normalize_phone(value, &config.masks.country_code);
            let ok = phone.len() > 11;
            (phone, ok)
        }
    };
    println!("{} {}", if ok { "ok" } else { "inválido" }, shown);
    Ok(if ok { 0 } else { 4 })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CONFIG.clone();
    if let Err(e) = init_logging(&config.log_level, cli.debug) {
        eprintln!("[leadform] {e}");
        return ExitCode::from(2);
    }
    let result = match cli.command {
        Commands::Steps { catalog } => cmd_steps(&config, catalog).await,
        Commands::Fill { catalog, answers, out, parent_url, referrer } => {
            cmd_fill(&config, catalog, answers, out, parent_url, referrer).await
        }
        Commands::Check { kind, value } => cmd_check(&config, kind, &value),
    };
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(5)
        }
    }
}
