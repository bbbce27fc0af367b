//! Demo: recorre un formulario de captación de leads en memoria con
//! respuestas guionadas e imprime el payload enviado.
use form_core::{FieldDefinition, FieldType, FormSession, InMemoryFieldCatalog, MemorySink, StepEngine};
use form_domain::MoneyLimits;
use leadform_rust::logging::init_logging;
use leadform_rust::script::{run_scripted, ScriptedOutcome};
use leadform_rust::{AppError, CONFIG};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

fn demo_catalog() -> Vec<FieldDefinition> {
    vec![FieldDefinition::new("name", FieldType::Name, 0).required().with_label("Nombre"),
         FieldDefinition::new("email", FieldType::Email, 1).required().with_label("Email"),
         FieldDefinition::new("phone", FieldType::Phone, 2).with_label("Teléfono"),
         FieldDefinition::division("step-2", 3),
         FieldDefinition::new("company", FieldType::Cnpj, 4).with_label("CNPJ"),
         FieldDefinition::new("interest", FieldType::Select, 5).required()
                                                                .with_label("Interés")
                                                                .with_options_csv("Demo, Precios, Soporte"),
         FieldDefinition::division("step-3", 6),
         FieldDefinition::new("budget", FieldType::Money, 7).with_label("Presupuesto")
                                                             .with_money_limits(MoneyLimits { min: None,
                                                                                              max: Some(Decimal::new(50_000, 0)) }),
         FieldDefinition::new("consent", FieldType::Checkbox, 8).required().with_label("Acepto")]
}

fn demo_answers() -> Map<String, Value> {
    let answers = json!({
        "name": "joão DA silva",
        "email": " Joao@Example.com ",
        "phone": "11987654321",
        "company": "11222333000181",
        "interest": "Demo",
        "budget": "1234567",
        "consent": true
    });
    match answers {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = CONFIG.clone();
    init_logging(&config.log_level, false)?;

    let engine = StepEngine::new().with_settings(config.masks.clone());
    let mut session = FormSession::with_engine(InMemoryFieldCatalog::new(demo_catalog()), MemorySink::new(), engine);
    match run_scripted(&mut session, &demo_answers()).await? {
        ScriptedOutcome::Submitted(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            println!("envíos en sink: {}", session.sink().payloads().len());
        }
        ScriptedOutcome::Blocked { step, missing } => {
            println!("bloqueado en paso {step}: faltan {missing:?}");
        }
    }
    Ok(())
}
