//! Upstream GRIB2 locations for a forecast cycle.

use std::fmt;
use std::str::FromStr;

use wave_common::ForecastCycle;

/// NOAA Operational Model Archive and Distribution System.
pub const NOMADS_BASE_URL: &str = "https://nomads.ncep.noaa.gov";

/// Which NOMADS path layout to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlTemplate {
    /// Full global file from the production archive.
    #[default]
    Archive,
    /// `filterwave_gfs_0p25.pl` CGI, one variable at surface level.
    Filter,
}

impl FromStr for UrlTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "archive" => Ok(UrlTemplate::Archive),
            "filter" => Ok(UrlTemplate::Filter),
            other => Err(format!(
                "unknown URL template '{}', expected archive or filter",
                other
            )),
        }
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlTemplate::Archive => write!(f, "archive"),
            UrlTemplate::Filter => write!(f, "filter"),
        }
    }
}

/// Builds the GFS Wave analysis (f000) URL for a cycle.
///
/// ```
/// use ingestion::SourceUrl;
/// use wave_common::ForecastCycle;
///
/// let cycle = ForecastCycle::parse("20250617", "06").unwrap();
/// let url = SourceUrl::nomads().url_for(&cycle);
/// assert_eq!(
///     url,
///     "https://nomads.ncep.noaa.gov/pub/data/nccf/com/gfs/v16.3/gfs.20250617/06/wave/gridded/gfswave.t06z.global.0p25.f000.grib2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    base_url: String,
    template: UrlTemplate,
    variable: String,
}

impl SourceUrl {
    /// `variable` is only used by the filter template.
    pub fn new(base_url: impl Into<String>, template: UrlTemplate, variable: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            template,
            variable: variable.into(),
        }
    }

    /// Production archive with WVDIR selected.
    pub fn nomads() -> Self {
        Self::new(NOMADS_BASE_URL, UrlTemplate::Archive, "WVDIR")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn template(&self) -> UrlTemplate {
        self.template
    }

    /// `gfswave.t{hh}z.global.0p25.f000.grib2`
    pub fn file_name(cycle: &ForecastCycle) -> String {
        format!("gfswave.t{}z.global.0p25.f000.grib2", cycle.cycle.two_digit())
    }

    pub fn url_for(&self, cycle: &ForecastCycle) -> String {
        let date = cycle.date_compact();
        let hour = cycle.cycle.two_digit();
        let file = Self::file_name(cycle);

        match self.template {
            UrlTemplate::Archive => format!(
                "{}/pub/data/nccf/com/gfs/v16.3/gfs.{}/{}/wave/gridded/{}",
                self.base_url, date, hour, file
            ),
            UrlTemplate::Filter => format!(
                "{}/cgi-bin/filterwave_gfs_0p25.pl?file={}&var_{}=on&lev_surface=on\
                 &subregion=&leftlon=0&rightlon=360&toplat=90&bottomlat=-90&dir=/gfswave.{}/{}",
                self.base_url, file, self.variable, date, hour
            ),
        }
    }
}

impl Default for SourceUrl {
    fn default() -> Self {
        Self::nomads()
    }
}
