use serde::{Deserialize, Deserializer};

/// City a postal code belongs to, as reported by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityLookupResult {
    pub city_name: String,
    pub found: bool,
}

/// Raw temperature reading from the weather provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub celsius: f64,
}

/// ViaCEP response body. Only the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct ViaCepResponse {
    #[serde(default)]
    pub localidade: String,
    #[serde(default, deserialize_with = "flag_or_string")]
    pub erro: bool,
}

impl From<ViaCepResponse> for CityLookupResult {
    fn from(resp: ViaCepResponse) -> Self {
        Self {
            found: !resp.erro,
            city_name: resp.localidade,
        }
    }
}

/// ViaCEP reports unknown codes as `"erro": true` or `"erro": "true"`.
fn flag_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// WeatherAPI `current.json` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentConditions {
    pub temp_c: f64,
}

/// WeatherAPI error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorResponse {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorDetail {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// WeatherAPI error code for "No matching location found".
pub(crate) const NO_MATCHING_LOCATION: i64 = 1006;
