//! Address record returned by the postal-code lookup

use serde::{Deserialize, Serialize};

/// Address behind a CEP, as returned by ViaCEP.
///
/// Absent fields decode as empty strings. Only `locality` is used downstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CepAddress {
    /// Postal code, formatted `NNNNN-NNN`
    pub cep: String,
    /// Street name
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    /// City name, fed to the weather lookup
    #[serde(rename = "localidade")]
    pub locality: String,
    /// Two-letter state code
    #[serde(rename = "uf")]
    pub state: String,
    pub ibge: String,
    pub gia: String,
    /// Telephone area code
    #[serde(rename = "ddd")]
    pub area_code: String,
    pub siafi: String,
}
