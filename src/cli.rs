use clap::{Args, Parser, Subcommand};
use title_search::error::AppError;
use title_search::search::SearchForm;

use crate::app;

#[derive(Parser, Debug)]
#[command(
    name = "Title Search Agent",
    about = "Run automated real estate title searches from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the form input and submit a new title search
    Search(SearchArgs),
    /// Render a previously submitted title search by id
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Street address, e.g. "123 Main St"
    #[arg(long)]
    pub(crate) street: Option<String>,
    /// City, e.g. "Los Angeles"
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Two-letter state code, e.g. "CA"
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Postal code, e.g. "90001"
    #[arg(long)]
    pub(crate) zip_code: Option<String>,
    /// County name (optional)
    #[arg(long)]
    pub(crate) county: Option<String>,
    /// Assessor parcel number (optional)
    #[arg(long)]
    pub(crate) parcel_number: Option<String>,
    /// One of: full, quick, lien_only, encumbrance_only
    #[arg(long, default_value = "full")]
    pub(crate) search_type: String,
    /// Include historical records
    #[arg(long)]
    pub(crate) include_historical: bool,
    /// Jurisdiction governing record-keeping for the search (optional)
    #[arg(long)]
    pub(crate) jurisdiction: Option<String>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Identifier returned by a previous submission
    #[arg(long)]
    pub(crate) search_id: String,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Override the configured API base URL
    #[arg(long)]
    pub(crate) api_base: Option<String>,
    /// Emit the rendered results panel as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    /// Raw flag values become raw form input; the validator owns the rules,
    /// so missing flags surface as field errors rather than clap errors.
    pub(crate) fn form(&self) -> SearchForm {
        SearchForm {
            street: self.street.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            zip_code: self.zip_code.clone().unwrap_or_default(),
            county: self.county.clone(),
            parcel_number: self.parcel_number.clone(),
            search_type: self.search_type.clone(),
            include_historical: self.include_historical,
            jurisdiction: self.jurisdiction.clone(),
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Search(args) => app::run_search(args).await,
        Command::Status(args) => app::run_status(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_arguments_map_onto_the_form() {
        let cli = Cli::try_parse_from([
            "title-agent",
            "search",
            "--street",
            "123 Main St",
            "--city",
            "Los Angeles",
            "--state",
            "CA",
            "--zip-code",
            "90001",
            "--search-type",
            "lien_only",
            "--include-historical",
        ])
        .expect("arguments parse");

        let Command::Search(args) = cli.command else {
            panic!("expected the search command");
        };
        let form = args.form();
        assert_eq!(form.street, "123 Main St");
        assert_eq!(form.city, "Los Angeles");
        assert_eq!(form.state, "CA");
        assert_eq!(form.zip_code, "90001");
        assert_eq!(form.search_type, "lien_only");
        assert!(form.include_historical);
        assert_eq!(form.county, None);
    }

    #[test]
    fn omitted_flags_reach_the_validator_as_empty_fields() {
        let cli = Cli::try_parse_from(["title-agent", "search"]).expect("arguments parse");
        let Command::Search(args) = cli.command else {
            panic!("expected the search command");
        };
        let form = args.form();
        assert_eq!(form.street, "");
        assert_eq!(form.search_type, "full");
        assert!(!form.include_historical);
        assert!(form.validate().is_err());
    }

    #[test]
    fn status_requires_a_search_id() {
        assert!(Cli::try_parse_from(["title-agent", "status"]).is_err());
        let cli = Cli::try_parse_from(["title-agent", "status", "--search-id", "ts-0001"])
            .expect("arguments parse");
        let Command::Status(args) = cli.command else {
            panic!("expected the status command");
        };
        assert_eq!(args.search_id, "ts-0001");
        assert!(!args.output.json);
    }
}
