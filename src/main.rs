mod cli;
mod config;

use cli::Args;
use config::Settings;
use std::process;
use yadt_status::adapters::outbound::console::StderrProgressReporter;
use yadt_status::adapters::outbound::filesystem::FileSystemReader;
use yadt_status::adapters::outbound::rpm::RpmPackageDatabase;
use yadt_status::adapters::outbound::system::{InitScriptProbe, SystemHostProbe};
use yadt_status::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use yadt_status::application::use_cases::CollectStatusUseCase;
use yadt_status::shared::error::ExitCode;
use yadt_status::shared::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments (clap exits with code 2 on invalid input)
    let args = Args::parse_args();

    // Resolve settings: built-in defaults < defaults file < command line
    let mut settings = Settings::load(&args.defaults_file)?;
    args.apply_overrides(&mut settings);
    let request = settings.into_request(&std::env::current_dir()?)?;

    // Create adapters (Dependency Injection)
    let package_database = RpmPackageDatabase::new();
    let service_definition_reader = FileSystemReader::new();
    let state_file_reader = FileSystemReader::new();
    let service_probe = InitScriptProbe::new();
    let host_probe = SystemHostProbe::new();
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = CollectStatusUseCase::new(
        package_database,
        service_definition_reader,
        state_file_reader,
        service_probe,
        host_probe,
        progress_reporter,
    );

    // Execute use case
    let response = use_case.execute(request)?;

    // Format and present output
    let formatter = FormatterFactory::create(args.format);
    let formatted_output = formatter.format(&response.snapshot)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output));
    presenter.present(&formatted_output)?;

    Ok(())
}
