use log::{error, info};
use weather_dashboard::{DashboardError, WeatherDashboard};

/// OpenWeatherMap API key, see https://openweathermap.org/api. An invalid key falls
/// back to demo data.
const API_KEY: &str = "YOUR_API_KEY";
const CITY: &str = "coimbatore";
/// Skip the API and render demo data straight away.
const USE_DEMO: bool = false;

fn run() -> Result<(), DashboardError> {
    info!("Weather dashboard generator");

    let mut dashboard = WeatherDashboard::builder()
        .api_key(API_KEY)
        .city(CITY.to_string())
        .use_demo(USE_DEMO)
        .build()?;
    let output = dashboard.create_dashboard()?;

    let summary = output.data.forecast.summary()?;
    println!("Weather statistics summary ({} data)", output.mode);
    println!("{}", summary);
    info!("Dashboard written to {}", output.path.display());
    Ok(())
}

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    if let Err(e) = run() {
        error!("Dashboard generation failed: {}", e);
        std::process::exit(1);
    }
}
