use std::{
    path::PathBuf,
    time::Duration,
};

use color_eyre::eyre::Error;
use exosky_client::{
    ApiClient,
    AssetClient,
};
use exosky_protocol::{
    assets,
    catalog::StarCatalog,
    ExoplanetName,
};
use exosky_ui::app::config::{
    Config,
    Urls,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use url::Url;

use crate::summary::Summary;

/// Where the server is and which front end config to apply.
#[derive(Debug, clap::Args)]
pub struct Remote {
    /// Where the front end is served from. API and asset URLs are derived
    /// from it unless given explicitly.
    #[arg(long, env = "EXOSKY_BASE_URL", default_value = "http://localhost:3333/")]
    base_url: Url,

    #[arg(long, env = "EXOSKY_API_URL")]
    api_url: Option<Url>,

    #[arg(long, env = "EXOSKY_ASSET_URL")]
    asset_url: Option<Url>,

    /// Front end config file (JSON).
    #[arg(long, short)]
    config: Option<PathBuf>,
}

impl Remote {
    pub fn config(&self) -> Result<Config, Error> {
        match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Ok(Config::from_json_str(&json)?)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn urls(&self, config: &Config) -> Result<Urls, Error> {
        let mut urls = config.urls(&self.base_url)?;
        if let Some(api_url) = &self.api_url {
            urls.api_url = api_url.clone();
        }
        if let Some(asset_url) = &self.asset_url {
            urls.asset_url = asset_url.clone();
        }
        tracing::debug!(api_url = %urls.api_url, asset_url = %urls.asset_url, "remote");
        Ok(urls)
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar, Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")?
            .tick_strings(&["-", "\\", "|", "/", "-"]),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Fetch the sky of an exoplanet and summarize it.
///
/// Without an exoplanet the bundled earth sky is fetched from the asset host.
#[derive(Debug, clap::Args)]
pub struct StarsArgs {
    exoplanet: Option<String>,

    #[command(flatten)]
    remote: Remote,
}

impl StarsArgs {
    pub async fn run(self) -> Result<(), Error> {
        let config = self.remote.config()?;
        let urls = self.remote.urls(&config)?;

        let pb = spinner("fetching stars...")?;
        let catalog: StarCatalog = match self.exoplanet {
            Some(name) => {
                ApiClient::new(urls.api_url)
                    .get_planet_stars(&ExoplanetName::from(name))
                    .await?
            }
            None => {
                AssetClient::new(urls.asset_url)
                    .get_json(assets::EARTH_STARS)
                    .await?
            }
        };
        pb.finish_and_clear();

        let stars = catalog.stars();
        println!("{}", Summary::from_stars(&stars, &config.planet.stars).table());

        Ok(())
    }
}

/// Download the PDF report of an exoplanet.
#[derive(Debug, clap::Args)]
pub struct PrintArgs {
    exoplanet: String,

    /// Output file. Defaults to `<exoplanet>.pdf`.
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[command(flatten)]
    remote: Remote,
}

impl PrintArgs {
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", self.exoplanet)))
    }

    pub async fn run(self) -> Result<(), Error> {
        let config = self.remote.config()?;
        let urls = self.remote.urls(&config)?;
        let output = self.output();
        let api = ApiClient::new(urls.api_url);

        let pb = spinner("downloading report...")?;
        let pdf = api
            .print_report(&ExoplanetName::from(self.exoplanet))
            .await?;
        std::fs::write(&output, &pdf)?;
        pb.finish_with_message(format!(
            "wrote {} bytes to {}",
            pdf.len(),
            output.display()
        ));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::Args as Cli;

    fn print_args(args: &[&str]) -> PrintArgs {
        match Cli::try_parse_from(args) {
            Ok(Cli::Print(args)) => args,
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn urls_derive_from_the_base_url() {
        let args = print_args(&[
            "exosky-cli",
            "print",
            "TOI-700 d",
            "--base-url",
            "http://example.com/sky/",
        ]);
        let urls = args.remote.urls(&Config::default()).unwrap();
        assert_eq!(urls.api_url.as_str(), "http://example.com/sky/api/v1/");
        assert_eq!(urls.asset_url.as_str(), "http://example.com/sky/");
        assert_eq!(args.output(), PathBuf::from("TOI-700 d.pdf"));
    }

    #[test]
    fn explicit_urls_win() {
        let args = print_args(&[
            "exosky-cli",
            "print",
            "TOI-700 d",
            "--api-url",
            "http://api.example.com/v1/",
            "-o",
            "report.pdf",
        ]);
        let urls = args.remote.urls(&Config::default()).unwrap();
        assert_eq!(urls.api_url.as_str(), "http://api.example.com/v1/");
        assert_eq!(args.output(), PathBuf::from("report.pdf"));
    }

    #[test]
    fn stars_takes_an_optional_exoplanet() {
        let Ok(Cli::Stars(args)) = Cli::try_parse_from(["exosky-cli", "stars"])
        else {
            panic!("expected stars args");
        };
        assert_eq!(args.exoplanet, None);
        assert_eq!(args.remote.config().unwrap(), Config::default());
    }
}
