//! Shared "sweep pipeline" logic used by every front-end.
//!
//! load tables -> infer grids -> reshape each target column -> figures
//!
//! The terminal viewer, SVG renderer and ASCII printer only differ in how they
//! present the resulting `HeatmapFigure`s.

use crate::domain::{BioParam, ParameterSample, PlotStyle, SweepConfig, TargetColumn};
use crate::error::AppError;
use crate::grid::{fixed_parameters, parameter_grid, reshape, run_count};
use crate::io::ingest::{ResultsTable, load_parameter_samples, load_results};
use crate::plot::HeatmapFigure;

/// Both input table sets, fully loaded.
#[derive(Debug, Clone)]
pub struct SweepData {
    pub samples: Vec<ParameterSample>,
    pub results: ResultsTable,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: SweepData,
    pub figures: Vec<HeatmapFigure>,
}

/// Read every input eagerly, before anything is rendered.
pub fn load_sweep(config: &SweepConfig) -> Result<SweepData, AppError> {
    let results = load_results(&config.results_path)?;
    tracing::info!(
        path = %config.results_path.display(),
        rows = results.rows(),
        columns = results.headers().len(),
        "loaded results table"
    );

    let samples = load_parameter_samples(&config.params_dir, config.table_count)?;
    tracing::info!(
        dir = %config.params_dir.display(),
        tables = samples.len(),
        "loaded initial parameter tables"
    );

    Ok(SweepData { samples, results })
}

/// Execute the full pipeline.
pub fn run_sweep(config: &SweepConfig) -> Result<RunOutput, AppError> {
    let data = load_sweep(config)?;
    let figures = build_figures(&data, config)?;
    Ok(RunOutput { data, figures })
}

/// Build one figure per configured target, threading the plot style through
/// so that it stays `Classic` once an error column has been drawn.
pub fn build_figures(data: &SweepData, config: &SweepConfig) -> Result<Vec<HeatmapFigure>, AppError> {
    let mut style = PlotStyle::default();
    let mut figures = Vec::with_capacity(config.targets.len());
    for &target in &config.targets {
        style = style.for_target(target);
        figures.push(build_figure(
            data,
            target,
            config.y_param,
            config.x_param,
            style,
            config.strict,
        )?);
    }
    Ok(figures)
}

/// Lay `target`'s results column over the `y_param` x `x_param` grid.
pub fn build_figure(
    data: &SweepData,
    target: TargetColumn,
    y_param: BioParam,
    x_param: BioParam,
    style: PlotStyle,
    strict: bool,
) -> Result<HeatmapFigure, AppError> {
    if y_param == x_param {
        return Err(AppError::input(format!(
            "Axis parameters must differ (both are `{y_param}`)."
        )));
    }
    if data.samples.is_empty() {
        return Err(AppError::shape("No parameter samples loaded."));
    }

    let column = data.results.column(target.column()).ok_or_else(|| {
        AppError::input(format!(
            "Results table has no `{target}` column (found: {}).",
            data.results.headers().join(", ")
        ))
    })?;

    let x_grid = parameter_grid(x_param, &data.samples);
    let y_grid = parameter_grid(y_param, &data.samples);
    tracing::debug!(%target, ?x_grid, ?y_grid, "inferred grids");

    for param in [y_param, x_param] {
        let runs = run_count(data.samples.iter().map(|s| s.get(param)));
        let grid_len = if param == x_param { x_grid.len() } else { y_grid.len() };
        if runs % grid_len != 0 {
            tracing::warn!(
                %param,
                runs,
                grid_len,
                "parameter values are not grouped in whole cycles; the inferred grid may be wrong"
            );
        }
    }

    let reshaped = reshape(column, y_grid.len(), x_grid.len());
    if !reshaped.is_exact() {
        let message = format!(
            "`{target}`: {} result rows do not fill a {}x{} grid ({y_param} x {x_param}); \
             {} cells zero-padded, {} rows ignored",
            column.len(),
            y_grid.len(),
            x_grid.len(),
            reshaped.padded,
            reshaped.dropped,
        );
        if strict {
            return Err(AppError::shape(message));
        }
        tracing::warn!("{message}");
    }

    Ok(HeatmapFigure {
        target,
        y_param,
        x_param,
        fixed: fixed_parameters(&data.samples, y_param, x_param),
        y_grid,
        x_grid,
        values: reshaped.values,
        style,
        padded: reshaped.padded,
        dropped: reshaped.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(rows: usize) -> SweepData {
        let samples: Vec<ParameterSample> = [0.1, 0.2]
            .iter()
            .flat_map(|&sigma_m| {
                [0.01, 0.02, 0.03].into_iter().map(move |sigma_w| ParameterSample {
                    b: 1.0,
                    d: 0.0,
                    dd: 0.01,
                    sigma_m,
                    sigma_w,
                })
            })
            .collect();

        let column = |scale: f64| -> Vec<Option<f64>> {
            (0..rows).map(|i| Some(i as f64 * scale)).collect()
        };
        let results = ResultsTable::from_columns(
            TargetColumn::ALL
                .iter()
                .zip([1.0, 2.0, 3.0, 0.1, 0.01])
                .map(|(t, scale)| (t.column().to_string(), column(scale)))
                .collect(),
        );
        SweepData { samples, results }
    }

    #[test]
    fn figure_aligns_column_to_grid() {
        let fig = build_figure(
            &data(6),
            TargetColumn::Beta,
            BioParam::SigmaM,
            BioParam::SigmaW,
            PlotStyle::Default,
            true,
        )
        .unwrap();

        assert_eq!(fig.y_grid, vec![0.1, 0.2]);
        assert_eq!(fig.x_grid, vec![0.01, 0.02, 0.03]);
        assert_eq!(fig.values.shape(), (2, 3));
        assert_eq!(fig.values[(1, 0)], 6.0);
        assert_eq!(fig.title(), "b=1.0 d=0.0 dd=0.01");
        assert_eq!(fig.padded, 0);
    }

    #[test]
    fn short_results_are_padded_unless_strict() {
        let d = data(4);
        let fig = build_figure(
            &d,
            TargetColumn::Alpha,
            BioParam::SigmaM,
            BioParam::SigmaW,
            PlotStyle::Default,
            false,
        )
        .unwrap();
        assert_eq!(fig.padded, 2);
        assert_eq!(fig.values[(1, 2)], 0.0);

        let err = build_figure(
            &d,
            TargetColumn::Alpha,
            BioParam::SigmaM,
            BioParam::SigmaW,
            PlotStyle::Default,
            true,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), AppError::SHAPE);
    }

    #[test]
    fn identical_axes_are_rejected() {
        let err = build_figure(
            &data(6),
            TargetColumn::Alpha,
            BioParam::D,
            BioParam::D,
            PlotStyle::Default,
            false,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
    }

    #[test]
    fn unknown_column_is_input_error() {
        let mut d = data(6);
        d.results = ResultsTable::from_columns(vec![("alpha".to_string(), vec![Some(1.0)])]);
        let err = build_figure(
            &d,
            TargetColumn::Gamma,
            BioParam::SigmaM,
            BioParam::SigmaW,
            PlotStyle::Default,
            false,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains("gamma"));
    }

    #[test]
    fn figures_follow_target_order_and_style_switch() {
        let config = SweepConfig::default();
        let figures = build_figures(&data(6), &config).unwrap();
        let targets: Vec<_> = figures.iter().map(|f| f.target).collect();
        assert_eq!(targets, TargetColumn::ALL.to_vec());

        let styles: Vec<_> = figures.iter().map(|f| f.style).collect();
        assert_eq!(
            styles,
            vec![
                PlotStyle::Default,
                PlotStyle::Default,
                PlotStyle::Default,
                PlotStyle::Classic,
                PlotStyle::Classic,
            ]
        );
    }

    #[test]
    fn pcf_error_alone_uses_classic_style() {
        let config = SweepConfig {
            targets: vec![TargetColumn::PcfError, TargetColumn::Alpha],
            ..SweepConfig::default()
        };
        let figures = build_figures(&data(6), &config).unwrap();
        assert_eq!(figures[0].style, PlotStyle::Classic);
        assert_eq!(figures[1].style, PlotStyle::Classic);
    }

    #[test]
    fn ungrouped_axis_still_builds_figure() {
        // x revisits its first value before reaching 0.03: five runs over a two-value grid.
        let samples: Vec<ParameterSample> = [0.01, 0.02, 0.01, 0.02, 0.03]
            .into_iter()
            .map(|sigma_w| ParameterSample {
                b: 1.0,
                d: 0.0,
                dd: 0.01,
                sigma_m: 0.1,
                sigma_w,
            })
            .collect();
        let results = ResultsTable::from_columns(vec![(
            "alpha".to_string(),
            (1..=5).map(|i| Some(i as f64)).collect(),
        )]);
        let d = SweepData { samples, results };

        let fig = build_figure(
            &d,
            TargetColumn::Alpha,
            BioParam::SigmaM,
            BioParam::SigmaW,
            PlotStyle::Default,
            false,
        )
        .unwrap();
        assert_eq!(fig.x_grid, vec![0.01, 0.02]);
        assert_eq!(fig.y_grid, vec![0.1]);
        assert_eq!(fig.values.shape(), (1, 2));
        assert_eq!(fig.values[(0, 1)], 2.0);
        assert_eq!(fig.dropped, 3);
    }

    #[test]
    fn run_sweep_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("params");
        std::fs::create_dir(&params).unwrap();
        let mut i = 1;
        for m in [0.1, 0.2] {
            for w in [0.01, 0.02] {
                std::fs::write(
                    params.join(format!("{i}.csv")),
                    format!("b,d,dd,sigma_m,sigma_w\n1.0,0.0,0.01,{m},{w}\n"),
                )
                .unwrap();
                i += 1;
            }
        }
        let results = dir.path().join("result.csv");
        std::fs::write(
            &results,
            "alpha,beta,gamma,pop_error,pcf_error\n1,1,1,0.1,0.2\n2,,2,0.1,0.2\n3,3,3,,0.2\n4,4,4,0.4,0.2\n",
        )
        .unwrap();

        let config = SweepConfig {
            results_path: results,
            params_dir: params,
            table_count: 4,
            strict: true,
            ..SweepConfig::default()
        };
        let run = run_sweep(&config).unwrap();
        assert_eq!(run.figures.len(), 5);
        assert_eq!(run.figures[1].values[(0, 1)], 3.0);
        assert_eq!(run.figures[3].values[(1, 0)], 0.4);
    }
}
