use crate::infra::load_knowledge_base;
use clap::Args;
use healthinfo::config::KnowledgeBaseConfig;
use healthinfo::error::AppError;
use healthinfo::symptoms::{
    LookupPolicy, SymptomCatalog, SymptomCheckResponse, SymptomCheckService, SymptomSubmission,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Patient age in years (1-120)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i64,
    /// male, female, or other
    #[arg(long)]
    pub(crate) gender: String,
    /// Reported symptom; repeat for each symptom
    #[arg(long = "symptom", required = true)]
    pub(crate) symptoms: Vec<String>,
    /// Load the symptom table from this CSV instead of the built-in table
    #[arg(long)]
    pub(crate) knowledge_base: Option<PathBuf>,
    /// Match symptoms by substring when no exact name is known
    #[arg(long)]
    pub(crate) permissive: bool,
    /// Print the response as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SymptomsArgs {
    /// Only list symptoms containing this text
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Load the symptom table from this CSV instead of the built-in table
    #[arg(long)]
    pub(crate) knowledge_base: Option<PathBuf>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        age,
        gender,
        symptoms,
        knowledge_base,
        permissive,
        json,
    } = args;

    let lookup = if permissive {
        LookupPolicy::Permissive
    } else {
        LookupPolicy::Exact
    };
    let service = build_service(knowledge_base, lookup)?;
    let response = service.check(SymptomSubmission {
        age,
        gender,
        symptoms,
    })?;

    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Response payload unavailable: {}", err),
        }
    } else {
        render_check(&response);
    }

    Ok(())
}

pub(crate) fn run_symptom_listing(args: SymptomsArgs) -> Result<(), AppError> {
    let service = build_service(args.knowledge_base, LookupPolicy::Exact)?;
    let catalog = service.catalog(args.query.as_deref());
    render_catalog(&catalog, &service.info().source);
    Ok(())
}

fn build_service(
    path: Option<PathBuf>,
    lookup: LookupPolicy,
) -> Result<SymptomCheckService, AppError> {
    let config = KnowledgeBaseConfig { path, lookup };
    let knowledge = load_knowledge_base(&config)?;
    Ok(SymptomCheckService::new(Arc::new(knowledge)))
}

fn render_check(response: &SymptomCheckResponse) {
    if response.conditions.is_empty() {
        println!("No specific conditions identified for the reported symptoms.");
    } else {
        println!("Possible conditions");
        for (rank, condition) in response.conditions.iter().enumerate() {
            println!(
                "{}. {} ({:.0}% | urgency {}/5)",
                rank + 1,
                condition.name,
                condition.probability,
                condition.urgency
            );
            println!("   {}", condition.description);
        }
    }

    println!("\n{}", response.disclaimer);
}

fn render_catalog(catalog: &SymptomCatalog, source: &str) {
    println!("Known symptoms ({} from {})", catalog.total, source);
    for symptom in &catalog.symptoms {
        println!("- {}", symptom);
    }
}
