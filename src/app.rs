use title_search::config::{ApiConfig, AppConfig};
use title_search::error::AppError;
use title_search::search::{
    EnvCredentialStore, HttpSearchGateway, ResultsPanel, SearchSession, TitleSearchResult,
};
use title_search::telemetry;
use tracing::info;

use crate::cli::{SearchArgs, StatusArgs};

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let session = bootstrap(args.output.api_base.clone())?;

    let request = match args.form().validate() {
        Ok(request) => request,
        Err(errors) => {
            for error in errors.fields() {
                eprintln!("{error}");
            }
            return Err(AppError::Validation(errors));
        }
    };

    info!(
        address = %request.property_address,
        search_type = request.search_type.as_str(),
        "submitting title search"
    );
    let outcome = session.submit(request).await?;
    emit(outcome.result(), args.output.json)
}

pub(crate) async fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let session = bootstrap(args.output.api_base.clone())?;

    info!(search_id = %args.search_id, "fetching title search");
    let outcome = session.refresh(&args.search_id).await?;
    emit(outcome.result(), args.output.json)
}

fn bootstrap(
    api_base: Option<String>,
) -> Result<SearchSession<HttpSearchGateway, EnvCredentialStore>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(base) = api_base {
        config.api = ApiConfig::new(base)?;
    }
    telemetry::init(&config.telemetry)?;

    let gateway = HttpSearchGateway::new(&config.api);
    Ok(SearchSession::new(gateway, EnvCredentialStore::default()))
}

fn emit(result: &TitleSearchResult, as_json: bool) -> Result<(), AppError> {
    let panel = ResultsPanel::render(result);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&panel)?);
    } else {
        print!("{panel}");
    }
    Ok(())
}
