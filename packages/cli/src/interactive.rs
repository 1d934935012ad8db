//! Menu-driven interface over one snapshot.
//!
//! Uses `dialoguer` prompts so the analyses can be run without
//! remembering subcommand arguments.

use dialoguer::{Confirm, Input, Select};
use ev_siting_analytics::advice::recommend;
use ev_siting_analytics::{AnalysisConfig, SiteAnalyzer};
use ev_siting_station_models::{CatalogueSnapshot, Coordinate};
use rand_chacha::ChaCha8Rng;

use crate::{AreaReport, ScoreReport, print_json};

/// Placeholder entry for "no neighborhood" in the neighborhood prompt.
const WHOLE_DISTRICT: &str = "(whole district)";

enum Action {
    ScoreLocation,
    AnalyzeArea,
    ProjectRoi,
    RankCompetitors,
    ShowStats,
}

impl Action {
    const ALL: &[Self] = &[
        Self::ScoreLocation,
        Self::AnalyzeArea,
        Self::ProjectRoi,
        Self::RankCompetitors,
        Self::ShowStats,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ScoreLocation => "Score a location",
            Self::AnalyzeArea => "Analyze an area",
            Self::ProjectRoi => "Project return on investment",
            Self::RankCompetitors => "Rank competitors",
            Self::ShowStats => "Show catalogue statistics",
        }
    }
}

/// Runs the interactive menu until the user declines to continue.
///
/// # Errors
///
/// Returns an error if a prompt fails, the config is invalid, or a
/// selected analysis fails.
pub fn run(
    snapshot: &CatalogueSnapshot,
    config: AnalysisConfig,
    rng: &mut ChaCha8Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = SiteAnalyzer::new(snapshot, config)?;

    println!("EV Charging Station Siting");
    println!(
        "{} stations, {} cities",
        snapshot.stations.len(),
        snapshot.cities.len()
    );
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let outcome = match Action::ALL[idx] {
            Action::ScoreLocation => score_location(&analyzer),
            Action::AnalyzeArea => analyze_area(&analyzer, rng),
            Action::ProjectRoi => project_roi(&analyzer, None),
            Action::RankCompetitors => print_json(&analyzer.competitors(rng)),
            Action::ShowStats => print_json(&analyzer.stats()),
        };
        if let Err(e) = outcome {
            println!("Error: {e}");
        }

        let again = Confirm::new()
            .with_prompt("Run another analysis?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

fn prompt_f64(prompt: &str, default: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(input.trim().parse()?)
}

fn score_location(analyzer: &SiteAnalyzer<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let lat = prompt_f64("Latitude", "41.0082")?;
    let lon = prompt_f64("Longitude", "28.9784")?;

    let score = analyzer.score(Coordinate::new(lat, lon))?;
    print_json(&ScoreReport {
        score: &score,
        recommendation: recommend(&score),
    })?;

    let project = Confirm::new()
        .with_prompt("Project return on investment for this score?")
        .default(true)
        .interact()?;
    if project {
        project_roi(analyzer, Some(score.score))?;
    }

    Ok(())
}

fn analyze_area(
    analyzer: &SiteAnalyzer<'_>,
    rng: &mut ChaCha8Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    let cities: Vec<&str> = analyzer
        .snapshot()
        .cities
        .iter()
        .map(|c| c.city.as_str())
        .collect();
    if cities.is_empty() {
        println!("The snapshot has no city profiles.");
        return Ok(());
    }

    let city = cities[Select::new()
        .with_prompt("City")
        .items(&cities)
        .default(0)
        .interact()?];

    let districts = analyzer.districts(city)?;
    let district = districts[Select::new()
        .with_prompt("District")
        .items(&districts)
        .default(0)
        .interact()?];

    let mut neighborhoods = vec![WHOLE_DISTRICT];
    neighborhoods.extend(analyzer.neighborhoods(city, district)?);
    let picked = Select::new()
        .with_prompt("Neighborhood")
        .items(&neighborhoods)
        .default(0)
        .interact()?;
    let neighborhood = (picked > 0).then(|| neighborhoods[picked]);

    let candidates = analyzer.analyze_area(city, district, neighborhood, rng)?;
    print_json(&AreaReport {
        summary: analyzer.area_summary(city, &candidates),
        candidates: &candidates,
    })
}

fn project_roi(
    analyzer: &SiteAnalyzer<'_>,
    score: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let score = match score {
        Some(score) => score,
        None => prompt_f64("Suitability score (0-100)", "70")?,
    };
    let investment = prompt_f64("Investment amount", "100000")?;

    let periods: String = Input::new()
        .with_prompt("Yearly periods (empty for default)")
        .allow_empty(true)
        .interact_text()?;
    let periods = if periods.trim().is_empty() {
        None
    } else {
        Some(periods.trim().parse()?)
    };

    print_json(&analyzer.project(score, investment, periods)?)
}
