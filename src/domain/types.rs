//! Shared domain types.
//!
//! Enums here double as CLI values (`clap::ValueEnum`) and as serialized
//! names in exports, so their string forms match the CSV column names.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the five biological parameters that define a simulation scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum BioParam {
    #[serde(rename = "b")]
    #[value(name = "b")]
    B,
    #[serde(rename = "d")]
    #[value(name = "d")]
    D,
    #[serde(rename = "dd")]
    #[value(name = "dd")]
    Dd,
    #[serde(rename = "sigma_m")]
    #[value(name = "sigma_m")]
    SigmaM,
    #[serde(rename = "sigma_w")]
    #[value(name = "sigma_w")]
    SigmaW,
}

impl BioParam {
    /// Canonical order, also used for the fixed-parameter title.
    pub const ALL: [BioParam; 5] = [
        BioParam::B,
        BioParam::D,
        BioParam::Dd,
        BioParam::SigmaM,
        BioParam::SigmaW,
    ];

    /// Column name in the initial-parameters CSV files.
    pub fn column(self) -> &'static str {
        match self {
            BioParam::B => "b",
            BioParam::D => "d",
            BioParam::Dd => "dd",
            BioParam::SigmaM => "sigma_m",
            BioParam::SigmaW => "sigma_w",
        }
    }

    pub fn axis_label(self) -> String {
        format!("{} value", self.column())
    }
}

impl std::fmt::Display for BioParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// One initial-parameters table: the scenario a single simulation ran with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSample {
    pub b: f64,
    pub d: f64,
    pub dd: f64,
    pub sigma_m: f64,
    pub sigma_w: f64,
}

impl ParameterSample {
    pub fn get(&self, param: BioParam) -> f64 {
        match param {
            BioParam::B => self.b,
            BioParam::D => self.d,
            BioParam::Dd => self.dd,
            BioParam::SigmaM => self.sigma_m,
            BioParam::SigmaW => self.sigma_w,
        }
    }
}

/// A results column that can be rendered as a heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TargetColumn {
    Alpha,
    Beta,
    Gamma,
    #[value(name = "pop_error")]
    PopError,
    #[value(name = "pcf_error")]
    PcfError,
}

impl TargetColumn {
    /// Default render order.
    pub const ALL: [TargetColumn; 5] = [
        TargetColumn::Alpha,
        TargetColumn::Beta,
        TargetColumn::Gamma,
        TargetColumn::PopError,
        TargetColumn::PcfError,
    ];

    /// Column name in the results CSV.
    pub fn column(self) -> &'static str {
        match self {
            TargetColumn::Alpha => "alpha",
            TargetColumn::Beta => "beta",
            TargetColumn::Gamma => "gamma",
            TargetColumn::PopError => "pop_error",
            TargetColumn::PcfError => "pcf_error",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, TargetColumn::PopError | TargetColumn::PcfError)
    }

    /// Greek symbol of an optimized closure parameter.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            TargetColumn::Alpha => Some("α"),
            TargetColumn::Beta => Some("β"),
            TargetColumn::Gamma => Some("γ"),
            TargetColumn::PopError | TargetColumn::PcfError => None,
        }
    }

    /// Figure-level title.
    pub fn suptitle(self) -> String {
        match self {
            TargetColumn::PopError => "Population error".to_string(),
            TargetColumn::PcfError => "PCF error".to_string(),
            _ => format!("Optimal {}", self.symbol().unwrap_or(self.column())),
        }
    }

    pub fn colorbar_label(self) -> String {
        match self {
            TargetColumn::PopError => "Relative value of difference between populations".to_string(),
            TargetColumn::PcfError => "Relative error of pcf norm".to_string(),
            _ => format!("Optimal {} value", self.symbol().unwrap_or(self.column())),
        }
    }
}

impl std::fmt::Display for TargetColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Color style used for a figure.
///
/// Once an error column has been drawn the style stays `Classic` for the rest
/// of the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    #[default]
    Default,
    Classic,
}

impl PlotStyle {
    /// Style to use for `target`, given the style currently in effect.
    pub fn for_target(self, target: TargetColumn) -> PlotStyle {
        if target.is_error() {
            PlotStyle::Classic
        } else {
            self
        }
    }
}

/// Export format for reshaped grid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub results_path: PathBuf,
    pub params_dir: PathBuf,
    /// Number of initial-parameter tables, read as `1.csv ..= {count}.csv`.
    pub table_count: usize,
    pub y_param: BioParam,
    pub x_param: BioParam,
    pub targets: Vec<TargetColumn>,
    /// Reject grid/results shape mismatches instead of padding.
    pub strict: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("./out_data/result.csv"),
            params_dir: PathBuf::from("./in_data/simulations_results/initial_parameters"),
            table_count: 25,
            y_param: BioParam::SigmaM,
            x_param: BioParam::SigmaW,
            targets: TargetColumn::ALL.to_vec(),
            strict: false,
        }
    }
}
