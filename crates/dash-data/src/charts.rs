//! Plot-ready data for each chart the visualization view offers
//!
//! Everything here is computed from a [`Dataset`] without touching egui, so
//! the numbers behind a chart can be checked independently of how it is drawn.

use tracing::debug;

use dash_core::{ColumnKind, Dataset};
use crate::DataError;
use crate::column::{numeric_column, numeric_values, text_values};
use crate::stats::{quantile_sorted, sample_std, value_counts};

/// Number of points sampled along a KDE curve
const KDE_POINTS: usize = 200;

/// Above this many "auto" bins the histogram falls back to the Sturges count
const MAX_AUTO_BINS: usize = 500;

/// Chart types selectable in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    Histogram,
    Bar,
    Box,
    Heatmap,
    Scatter,
    PairGrid,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Histogram,
        ChartKind::Bar,
        ChartKind::Box,
        ChartKind::Heatmap,
        ChartKind::Scatter,
        ChartKind::PairGrid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Box => "Box Plot",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::PairGrid => "Pairplot",
        }
    }

    /// Which columns the kind's selectors draw from, if it has any
    pub fn selector_kind(&self) -> Option<ColumnKind> {
        match self {
            ChartKind::Histogram | ChartKind::Box | ChartKind::Scatter => Some(ColumnKind::Numeric),
            ChartKind::Bar => Some(ColumnKind::Categorical),
            ChartKind::Heatmap | ChartKind::PairGrid => None,
        }
    }
}

/// A fully specified chart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSpec {
    Histogram { column: String },
    Bar { column: String },
    Box { column: String },
    Heatmap,
    Scatter { x: String, y: String },
    PairGrid { max_columns: usize },
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Histogram { .. } => ChartKind::Histogram,
            ChartSpec::Bar { .. } => ChartKind::Bar,
            ChartSpec::Box { .. } => ChartKind::Box,
            ChartSpec::Heatmap => ChartKind::Heatmap,
            ChartSpec::Scatter { .. } => ChartKind::Scatter,
            ChartSpec::PairGrid { .. } => ChartKind::PairGrid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// Density curve scaled to bin counts, empty when it cannot be estimated
    pub kde: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueCountsData {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub column: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `None` where a pair has fewer than two complete rows or no variance
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairGridData {
    pub columns: Vec<String>,
    /// Row-aligned values per column, nulls kept so pairs stay aligned
    pub values: Vec<Vec<Option<f64>>>,
    /// Diagonal histograms, `None` for a column without values
    pub histograms: Vec<Option<HistogramData>>,
    /// Numeric columns in the dataset before the grid limit was applied
    pub total_numeric: usize,
}

impl PairGridData {
    pub fn is_truncated(&self) -> bool {
        self.total_numeric > self.columns.len()
    }

    /// Points for the cell with `x` on the horizontal axis and `y` vertical
    pub fn points(&self, x: usize, y: usize) -> Vec<[f64; 2]> {
        complete_pairs(&self.values[x], &self.values[y])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Histogram(HistogramData),
    ValueCounts(ValueCountsData),
    Box(BoxStats),
    Correlation(CorrelationMatrix),
    Scatter(ScatterData),
    PairGrid(PairGridData),
}

/// Compute the data behind a chart
pub fn prepare(spec: &ChartSpec, dataset: &Dataset) -> Result<ChartData, DataError> {
    debug!("Preparing {} for {}", spec.kind().label(), dataset.name());

    let data = match spec {
        ChartSpec::Histogram { column } => {
            let values = numeric_column(dataset, column)?;
            ChartData::Histogram(histogram(column, &values)?)
        }
        ChartSpec::Bar { column } => {
            let array = dataset.column(column)
                .ok_or_else(|| DataError::ColumnNotFound(column.clone()))?;
            ChartData::ValueCounts(ValueCountsData {
                column: column.clone(),
                counts: value_counts(&text_values(array)),
            })
        }
        ChartSpec::Box { column } => {
            let values = numeric_column(dataset, column)?;
            ChartData::Box(box_stats(column, &values)?)
        }
        ChartSpec::Heatmap => ChartData::Correlation(correlation_matrix(dataset)?),
        ChartSpec::Scatter { x, y } => {
            let xs = aligned_numeric(dataset, x)?;
            let ys = aligned_numeric(dataset, y)?;
            ChartData::Scatter(ScatterData {
                x_column: x.clone(),
                y_column: y.clone(),
                points: complete_pairs(&xs, &ys),
            })
        }
        ChartSpec::PairGrid { max_columns } => ChartData::PairGrid(pair_grid(dataset, *max_columns)?),
    };

    Ok(data)
}

/// Row-aligned values of a numeric column, nulls included
fn aligned_numeric(dataset: &Dataset, name: &str) -> Result<Vec<Option<f64>>, DataError> {
    let array = dataset.column(name)
        .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
    if ColumnKind::of(array.data_type()) != ColumnKind::Numeric {
        return Err(DataError::NotNumeric(name.to_string()));
    }
    numeric_values(array)
}

fn complete_pairs(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some([(*x)?, (*y)?]))
        .collect()
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Bin width from the "auto" rule: the smaller of the Sturges and
/// Freedman-Diaconis widths, falling back to Sturges when the IQR is zero.
fn auto_bin_width(sorted: &[f64]) -> f64 {
    let n = sorted.len() as f64;
    let range = sorted[sorted.len() - 1] - sorted[0];

    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);

    if fd > 0.0 {
        fd.min(sturges)
    } else {
        sturges
    }
}

/// Histogram with "auto" bins and a count-scaled KDE overlay
pub fn histogram(column: &str, values: &[f64]) -> Result<HistogramData, DataError> {
    if values.is_empty() {
        return Err(DataError::EmptyColumn(column.to_string()));
    }

    let sorted = sorted_copy(values);
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let (start, end, bin_count) = if max > min {
        let width = auto_bin_width(&sorted);
        let sturges = ((sorted.len() as f64).log2() + 1.0).ceil() as usize;
        let count = if width > 0.0 {
            ((max - min) / width).ceil().max(1.0)
        } else {
            1.0
        };
        // A single far outlier can shrink the FD width to nothing
        let count = if count > MAX_AUTO_BINS as f64 {
            sturges.max(1)
        } else {
            count as usize
        };
        (min, max, count)
    } else {
        (min - 0.5, max + 0.5, 1)
    };

    let step = (end - start) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in &sorted {
        // Last edge is inclusive
        let idx = (((v - start) / step) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts.into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + step * i as f64,
            end: if i + 1 == bin_count { end } else { start + step * (i + 1) as f64 },
            count,
        })
        .collect();

    let kde = kde_curve(&sorted, step);

    Ok(HistogramData {
        column: column.to_string(),
        bins,
        kde,
    })
}

/// Gaussian KDE with Scott's bandwidth, evaluated across the data range and
/// scaled so its area matches the histogram's
fn kde_curve(sorted: &[f64], bin_width: f64) -> Vec<[f64; 2]> {
    let std_dev = match sample_std(sorted) {
        Some(s) if s > 0.0 => s,
        _ => return Vec::new(),
    };

    let n = sorted.len() as f64;
    let bandwidth = std_dev * n.powf(-0.2);
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let scale = n * bin_width;
    let norm = (2.0 * std::f64::consts::PI).sqrt() * bandwidth * n;

    (0..KDE_POINTS)
        .map(|i| {
            let x = min + (max - min) * i as f64 / (KDE_POINTS - 1) as f64;
            let density: f64 = sorted.iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>() / norm;
            [x, density * scale]
        })
        .collect()
}

/// Quartiles, 1.5 IQR whiskers and outliers for a horizontal box plot
pub fn box_stats(column: &str, values: &[f64]) -> Result<BoxStats, DataError> {
    if values.is_empty() {
        return Err(DataError::EmptyColumn(column.to_string()));
    }

    let sorted = sorted_copy(values);
    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

    let outliers = sorted.iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Ok(BoxStats {
        column: column.to_string(),
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
    })
}

/// Pearson correlation over the rows where both columns are present
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs = complete_pairs(xs, ys);
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for [x, y] in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation matrix over every numeric column
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix, DataError> {
    let columns = dataset.numeric_columns();
    if columns.is_empty() {
        return Err(DataError::NoNumericColumns);
    }

    let data = columns.iter()
        .map(|name| aligned_numeric(dataset, name))
        .collect::<Result<Vec<_>, _>>()?;

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                pearson(&data[i], &data[j]).map(|_| 1.0)
            } else {
                pearson(&data[i], &data[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

/// Data for the pairwise grid, limited to the first `max_columns` numeric columns
pub fn pair_grid(dataset: &Dataset, max_columns: usize) -> Result<PairGridData, DataError> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return Err(DataError::NoNumericColumns);
    }

    let total_numeric = numeric.len();
    let columns: Vec<String> = numeric.into_iter().take(max_columns.max(1)).collect();

    let values = columns.iter()
        .map(|name| aligned_numeric(dataset, name))
        .collect::<Result<Vec<_>, _>>()?;

    let histograms = columns.iter()
        .zip(&values)
        .map(|(name, column)| {
            let present: Vec<f64> = column.iter().flatten().copied().collect();
            histogram(name, &present).ok()
        })
        .collect();

    Ok(PairGridData {
        columns,
        values,
        histograms,
        total_numeric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::sources::read_csv;

    fn load(text: &str) -> Dataset {
        read_csv("charts.csv", text.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_chart_labels() {
        let labels: Vec<&str> = ChartKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Histogram", "Bar Chart", "Box Plot", "Heatmap", "Scatter Plot", "Pairplot"]);
        assert_eq!(ChartKind::Bar.selector_kind(), Some(ColumnKind::Categorical));
        assert_eq!(ChartSpec::Heatmap.kind(), ChartKind::Heatmap);
    }

    #[test]
    fn test_histogram_auto_bins() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let hist = histogram("v", &values).unwrap();

        // Sturges: 9 / (log2(10) + 1) = 2.08; FD: 2 * 4.5 / 10^(1/3) = 4.18
        assert_eq!(hist.bins.len(), 5);
        assert_eq!(hist.bins[0].start, 1.0);
        assert_eq!(hist.bins[4].end, 10.0);
        let total: usize = hist.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);
        assert_eq!(hist.bins[4].count, 2);
        assert_eq!(hist.kde.len(), KDE_POINTS);
    }

    #[test]
    fn test_histogram_outlier_keeps_bins_bounded() {
        let mut values: Vec<f64> = (0..1000).map(|i| i as f64 / 1000.0).collect();
        values.push(1.0e6);

        let hist = histogram("v", &values).unwrap();

        assert_eq!(hist.bins.len(), 11);
        assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 1001);
        assert_eq!(hist.bins.last().map(|b| b.count), Some(1));
        assert_eq!(hist.bins.last().map(|b| b.end), Some(1.0e6));
    }

    #[test]
    fn test_histogram_constant_column() {
        let hist = histogram("c", &[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].start, 2.5);
        assert_eq!(hist.bins[0].end, 3.5);
        assert_eq!(hist.bins[0].count, 3);
        assert!(hist.kde.is_empty());
    }

    #[test]
    fn test_histogram_empty_column() {
        assert!(matches!(histogram("e", &[]), Err(DataError::EmptyColumn(_))));
    }

    #[test]
    fn test_kde_area_matches_counts() {
        let values: Vec<f64> = (0..50).map(|i| (i % 7) as f64 + (i / 7) as f64 * 0.5).collect();
        let hist = histogram("v", &values).unwrap();
        let peak = hist.kde.iter().map(|p| p[1]).fold(0.0, f64::max);
        let tallest = hist.bins.iter().map(|b| b.count).max().unwrap() as f64;
        assert!(peak > 0.0);
        assert!(peak < tallest * 2.0);
    }

    #[test]
    fn test_bar_value_counts() {
        let ds = load("fruit\napple\npear\napple\n\nplum\npear\n");
        let data = prepare(&ChartSpec::Bar { column: "fruit".into() }, &ds).unwrap();
        match data {
            ChartData::ValueCounts(vc) => assert_eq!(vc.counts, vec![
                ("apple".to_string(), 2),
                ("pear".to_string(), 2),
                ("plum".to_string(), 1),
            ]),
            other => panic!("unexpected chart data: {other:?}"),
        }
    }

    #[test]
    fn test_box_stats_outliers() {
        let stats = box_stats("v", &[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_correlation_pairwise_complete() {
        let ds = load("a,b,c,label\n1,2,5,x\n2,4,,y\n3,6,1,z\n4,,3,w\n");
        let corr = correlation_matrix(&ds).unwrap();
        assert_eq!(corr.columns, vec!["a", "b", "c"]);
        assert_eq!(corr.get(0, 0), Some(1.0));
        assert!((corr.get(0, 1).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(corr.get(0, 1), corr.get(1, 0));
        // b and c share rows 0 and 2 only
        assert!((corr.get(1, 2).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_constant_column_is_undefined() {
        let ds = load("a,k\n1,7\n2,7\n3,7\n");
        let corr = correlation_matrix(&ds).unwrap();
        assert_eq!(corr.get(0, 1), None);
        assert_eq!(corr.get(1, 1), None);
    }

    #[test]
    fn test_heatmap_without_numeric_columns() {
        let ds = load("name\nx\ny\n");
        assert!(matches!(prepare(&ChartSpec::Heatmap, &ds), Err(DataError::NoNumericColumns)));
    }

    #[test]
    fn test_scatter_skips_incomplete_rows() {
        let ds = load("x,y\n1,10\n2,\n,30\n4,40\n");
        let spec = ChartSpec::Scatter { x: "x".into(), y: "y".into() };
        match prepare(&spec, &ds).unwrap() {
            ChartData::Scatter(s) => assert_eq!(s.points, vec![[1.0, 10.0], [4.0, 40.0]]),
            other => panic!("unexpected chart data: {other:?}"),
        }
    }

    #[test]
    fn test_scatter_rejects_text_column() {
        let ds = load("x,name\n1,a\n");
        let spec = ChartSpec::Scatter { x: "x".into(), y: "name".into() };
        assert!(matches!(prepare(&spec, &ds), Err(DataError::NotNumeric(_))));
    }

    #[test]
    fn test_pair_grid_limit() {
        let ds = load("a,b,c,t\n1,2,3,x\n2,3,1,y\n3,1,2,z\n");
        let grid = pair_grid(&ds, 2).unwrap();
        assert_eq!(grid.columns, vec!["a", "b"]);
        assert!(grid.is_truncated());
        assert_eq!(grid.histograms.len(), 2);
        assert_eq!(grid.points(0, 1), vec![[1.0, 2.0], [2.0, 3.0], [3.0, 1.0]]);
    }
}
