//! Typed mirror of the ECharts option object plus the chart colour configuration.
//!
//! Field names serialize exactly as ECharts expects them (`xAxis`, `areaStyle`, ...) and
//! unset fields are omitted so the library applies its own defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::UiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Either a single item or a list, as several ECharts fields accept both.
pub enum OneOrMany<T> {
    /// Single item.
    One(T),
    /// List of items.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Pixel number or CSS-like string such as `"10%"` or `"center"`.
pub enum LengthValue {
    /// Pixels.
    Pixels(f64),
    /// Percentage or keyword.
    Text(String),
}

impl From<f64> for LengthValue {
    fn from(value: f64) -> Self {
        Self::Pixels(value)
    }
}

impl From<&str> for LengthValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Root ECharts option.
pub struct ChartOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Chart title.
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Hover tooltip.
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series legend.
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Plot area margins.
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Horizontal axis or axes.
    pub x_axis: Option<OneOrMany<Axis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Vertical axis or axes.
    pub y_axis: Option<OneOrMany<Axis>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Data series.
    pub series: Vec<Series>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Palette cycled through by series without their own colour.
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Canvas background.
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Enables or disables animation.
    pub animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Shared data source.
    pub dataset: Option<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `title` component.
pub struct Title {
    /// Main text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Secondary text.
    pub subtext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Horizontal position.
    pub left: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Vertical position.
    pub top: Option<LengthValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What hovering triggers the tooltip on.
pub enum TooltipTrigger {
    /// Individual data items.
    Item,
    /// Everything at the hovered axis position.
    Axis,
    /// Never shown by hover.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Axis pointer style.
pub enum AxisPointerType {
    /// Thin line.
    Line,
    /// Shaded band.
    Shadow,
    /// Crosshair.
    Cross,
    /// Hidden.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// `tooltip.axisPointer`.
pub struct AxisPointer {
    #[serde(rename = "type")]
    /// Pointer style.
    pub kind: AxisPointerType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `tooltip` component.
pub struct Tooltip {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Trigger mode.
    pub trigger: Option<TooltipTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Axis pointer shown with axis triggers.
    pub axis_pointer: Option<AxisPointer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// String template such as `{b}: {c}`.
    pub formatter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Legend layout direction.
pub enum LegendOrient {
    /// Items in a row.
    Horizontal,
    /// Items in a column.
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `legend` component.
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Visibility.
    pub show: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Series names to list; empty lists all series.
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Layout direction.
    pub orient: Option<LegendOrient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Horizontal position.
    pub left: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Distance from the top.
    pub top: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Distance from the bottom.
    pub bottom: Option<LengthValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `grid` component.
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Left margin.
    pub left: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Right margin.
    pub right: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Top margin.
    pub top: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bottom margin.
    pub bottom: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Whether margins include axis labels.
    pub contain_label: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Axis scale type.
pub enum AxisType {
    /// Discrete labels.
    Category,
    /// Continuous numbers.
    #[default]
    Value,
    /// Timestamps.
    Time,
    /// Logarithmic.
    Log,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Visibility toggle used by axis lines and split lines.
pub struct Show {
    /// Visibility.
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `axisLabel`.
pub struct AxisLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Visibility.
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// String template such as `{value} ms`.
    pub formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Rotation in degrees.
    pub rotate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `xAxis` / `yAxis` entry.
pub struct Axis {
    #[serde(rename = "type")]
    /// Scale type.
    pub kind: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Axis title.
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Category labels.
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Padding at both ends of a category axis.
    pub boundary_gap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Axis line visibility.
    pub axis_line: Option<Show>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Axis tick visibility.
    pub axis_tick: Option<Show>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Grid line visibility.
    pub split_line: Option<Show>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tick labels.
    pub axis_label: Option<AxisLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Lower bound.
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Upper bound.
    pub max: Option<f64>,
}

impl Axis {
    /// Category axis over `labels`.
    pub fn category<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: AxisType::Category,
            data: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Numeric axis.
    pub fn value() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// One series data point.
pub enum DataValue {
    /// Plain number.
    Number(f64),
    /// Coordinates, e.g. `[x, y]` for scatter series.
    Point(Vec<f64>),
    /// Named value, used by pie slices.
    Named {
        /// Item name.
        name: String,
        /// Item value.
        value: f64,
    },
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<[f64; 2]> for DataValue {
    fn from(value: [f64; 2]) -> Self {
        Self::Point(value.to_vec())
    }
}

impl From<(&str, f64)> for DataValue {
    fn from((name, value): (&str, f64)) -> Self {
        Self::Named {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `itemStyle`.
pub struct ItemStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Fill colour.
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Corner radius, uniform or per corner.
    pub border_radius: Option<OneOrMany<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `lineStyle`.
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stroke width.
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stroke colour.
    pub color: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    /// `solid`, `dashed`, or `dotted`.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `areaStyle`; its presence turns a line series into an area chart.
pub struct AreaStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Fill opacity.
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Fill colour.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Data labels.
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Visibility.
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// `inside`, `outside`, `top`, ...
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// String template.
    pub formatter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Line (and area) series.
pub struct LineSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series name shown in legend and tooltip.
    pub name: Option<String>,
    /// Data points.
    pub data: Vec<DataValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Curved line.
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stack group name.
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Draws point symbols.
    pub show_symbol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stroke style.
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Area fill.
    pub area_style: Option<AreaStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Point style.
    pub item_style: Option<ItemStyle>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Bar series.
pub struct BarSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series name.
    pub name: Option<String>,
    /// Data points.
    pub data: Vec<DataValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stack group name.
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bar width in pixels or percent.
    pub bar_width: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bar style.
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Value labels.
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Pie (and donut) series.
pub struct PieSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series name.
    pub name: Option<String>,
    /// Slices, usually [`DataValue::Named`].
    pub data: Vec<DataValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Outer radius, or `[inner, outer]` for a donut.
    pub radius: Option<OneOrMany<LengthValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Centre position.
    pub center: Option<[LengthValue; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Gap between slices in degrees.
    pub pad_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Slice style.
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Slice labels.
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Scatter series.
pub struct ScatterSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series name.
    pub name: Option<String>,
    /// Points, usually [`DataValue::Point`].
    pub data: Vec<DataValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Symbol size in pixels.
    pub symbol_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Point style.
    pub item_style: Option<ItemStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Series entry, tagged by its ECharts `type`.
pub enum Series {
    /// `type: "line"`.
    Line(LineSeries),
    /// `type: "bar"`.
    Bar(BarSeries),
    /// `type: "pie"`.
    Pie(PieSeries),
    /// `type: "scatter"`.
    Scatter(ScatterSeries),
}

fn collect_data<I, D>(data: I) -> Vec<DataValue>
where
    I: IntoIterator<Item = D>,
    D: Into<DataValue>,
{
    data.into_iter().map(Into::into).collect()
}

impl Series {
    /// Line series.
    pub fn line<I, D>(name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DataValue>,
    {
        Self::Line(LineSeries {
            name: Some(name.into()),
            data: collect_data(data),
            ..LineSeries::default()
        })
    }

    /// Line series with a filled area.
    pub fn area<I, D>(name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DataValue>,
    {
        Self::Line(LineSeries {
            name: Some(name.into()),
            data: collect_data(data),
            area_style: Some(AreaStyle {
                opacity: Some(0.4),
                color: None,
            }),
            ..LineSeries::default()
        })
    }

    /// Bar series.
    pub fn bar<I, D>(name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DataValue>,
    {
        Self::Bar(BarSeries {
            name: Some(name.into()),
            data: collect_data(data),
            ..BarSeries::default()
        })
    }

    /// Pie series.
    pub fn pie<I, D>(name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DataValue>,
    {
        Self::Pie(PieSeries {
            name: Some(name.into()),
            data: collect_data(data),
            ..PieSeries::default()
        })
    }

    /// Scatter series.
    pub fn scatter<I, D>(name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DataValue>,
    {
        Self::Scatter(ScatterSeries {
            name: Some(name.into()),
            data: collect_data(data),
            ..ScatterSeries::default()
        })
    }

    /// Series name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Line(series) => series.name.as_deref(),
            Self::Bar(series) => series.name.as_deref(),
            Self::Pie(series) => series.name.as_deref(),
            Self::Scatter(series) => series.name.as_deref(),
        }
    }

    /// Puts line and bar series in a stack group; other series are unchanged.
    pub fn stacked(mut self, stack: impl Into<String>) -> Self {
        match &mut self {
            Self::Line(series) => series.stack = Some(stack.into()),
            Self::Bar(series) => series.stack = Some(stack.into()),
            Self::Pie(_) | Self::Scatter(_) => {}
        }
        self
    }

    /// Sets the item colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let style = match &mut self {
            Self::Line(series) => &mut series.item_style,
            Self::Bar(series) => &mut series.item_style,
            Self::Pie(series) => &mut series.item_style,
            Self::Scatter(series) => &mut series.item_style,
        };
        style.get_or_insert_with(ItemStyle::default).color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `dataset` component.
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Column names.
    pub dimensions: Vec<String>,
    /// Rows or columns of raw data.
    pub source: Value,
}

impl ChartOption {
    /// Empty option.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title text.
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(Title {
            text: text.into(),
            ..Title::default()
        });
        self
    }

    /// Enables the tooltip with `trigger`.
    pub fn with_tooltip(mut self, trigger: TooltipTrigger) -> Self {
        self.tooltip = Some(Tooltip {
            trigger: Some(trigger),
            ..Tooltip::default()
        });
        self
    }

    /// Shows the legend.
    pub fn with_legend(mut self) -> Self {
        self.legend = Some(Legend {
            show: Some(true),
            ..Legend::default()
        });
        self
    }

    /// Sets a single category x axis.
    pub fn with_category_x_axis<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.x_axis = Some(OneOrMany::One(Axis::category(labels)));
        self
    }

    /// Sets a single value y axis.
    pub fn with_value_y_axis(mut self) -> Self {
        self.y_axis = Some(OneOrMany::One(Axis::value()));
        self
    }

    /// Sets the palette.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a series.
    pub fn push_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// JSON value handed to `setOption`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] when a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<Value, UiError> {
        serde_json::to_value(self).map_err(|err| UiError::invalid("Chart", err.to_string()))
    }

    /// JSON text handed to `setOption`.
    ///
    /// # Errors
    ///
    /// See [`ChartOption::to_json`].
    pub fn to_json_string(&self) -> Result<String, UiError> {
        serde_json::to_string(self).map_err(|err| UiError::invalid("Chart", err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Colours for light and dark themes.
pub struct ThemeColors {
    /// Light theme colour.
    pub light: String,
    /// Dark theme colour.
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Label and colour of one chart series.
pub struct ChartSeriesConfig {
    /// Human readable label for legends and tooltips.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Colour used in both themes.
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Per-theme colours; wins over `color`.
    pub theme: Option<ThemeColors>,
}

impl ChartSeriesConfig {
    /// Colour for the given theme.
    pub fn color_for(&self, dark: bool) -> Option<&str> {
        match &self.theme {
            Some(theme) if dark => Some(&theme.dark),
            Some(theme) => Some(&theme.light),
            None => self.color.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
/// Series key to label and colour, exposed to CSS as `--color-{key}`.
///
/// Entries keep declaration order so the palette lines up with the series by position.
pub struct ChartConfig {
    entries: IndexMap<String, ChartSeriesConfig>,
}

impl ChartConfig {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series with a single colour.
    pub fn with_series(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            key.into(),
            ChartSeriesConfig {
                label: label.into(),
                color: Some(color.into()),
                theme: None,
            },
        );
        self
    }

    /// Adds a series with per-theme colours.
    pub fn with_themed_series(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        theme: ThemeColors,
    ) -> Self {
        self.entries.insert(
            key.into(),
            ChartSeriesConfig {
                label: label.into(),
                color: None,
                theme: Some(theme),
            },
        );
        self
    }

    /// Entry for `key`.
    pub fn get(&self, key: &str) -> Option<&ChartSeriesConfig> {
        self.entries.get(key)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartSeriesConfig)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Label for `key`, falling back to the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .get(key)
            .map_or(key, |entry| entry.label.as_str())
    }

    /// `var(--color-{key})` reference for inline styles.
    pub fn color_var(key: &str) -> String {
        format!("var(--color-{})", css_ident(key))
    }

    /// `--color-{key}` declarations for an inline style attribute.
    pub fn css_variables(&self, dark: bool) -> String {
        self.entries
            .iter()
            .filter_map(|(key, entry)| {
                entry
                    .color_for(dark)
                    .map(|color| format!("--color-{}: {color};", css_ident(key)))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Style sheet scoping the variables to `[data-chart="{chart_id}"]`, with dark overrides
    /// under `.dark`.
    pub fn style_rules(&self, chart_id: &str) -> String {
        let light = self.css_variables(false);
        let dark = self.css_variables(true);
        let mut rules = String::new();
        if !light.is_empty() {
            rules.push_str(&format!("[data-chart=\"{chart_id}\"] {{ {light} }}"));
        }
        if !dark.is_empty() && dark != light {
            if !rules.is_empty() {
                rules.push('\n');
            }
            rules.push_str(&format!(".dark [data-chart=\"{chart_id}\"] {{ {dark} }}"));
        }
        rules
    }

    /// Concrete colours in declaration order, for option palettes.
    pub fn palette(&self, dark: bool) -> Vec<String> {
        self.entries
            .values()
            .filter_map(|entry| entry.color_for(dark).map(str::to_string))
            .collect()
    }

    /// Fills `option.color` from this configuration when the option has no palette.
    pub fn apply_palette(&self, option: &mut ChartOption, dark: bool) {
        if option.color.is_empty() {
            option.color = self.palette(dark);
        }
    }
}

/// Replaces characters that are not valid in a CSS custom property name.
fn css_ident(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn option_serializes_with_echarts_field_names() {
        let option = ChartOption::new()
            .with_tooltip(TooltipTrigger::Axis)
            .with_category_x_axis(["Jan", "Feb"])
            .with_value_y_axis()
            .push_series(Series::area("Desktop", [186.0, 305.0]).stacked("a"))
            .push_series(Series::bar("Mobile", [80.0, 200.0]).with_color("#2563eb"));

        assert_eq!(
            option.to_json().expect("json"),
            json!({
                "tooltip": { "trigger": "axis" },
                "xAxis": { "type": "category", "data": ["Jan", "Feb"] },
                "yAxis": { "type": "value" },
                "series": [
                    {
                        "type": "line",
                        "name": "Desktop",
                        "data": [186.0, 305.0],
                        "stack": "a",
                        "areaStyle": { "opacity": 0.4 }
                    },
                    {
                        "type": "bar",
                        "name": "Mobile",
                        "data": [80.0, 200.0],
                        "itemStyle": { "color": "#2563eb" }
                    }
                ]
            })
        );
    }

    #[test]
    fn pie_and_scatter_data_shapes() {
        let option = ChartOption::new()
            .push_series(Series::pie("Browsers", [("chrome", 275.0)]))
            .push_series(Series::scatter("Points", [[1.0, 2.0]]));
        let value = option.to_json().expect("json");
        assert_eq!(
            value["series"][0]["data"],
            json!([{ "name": "chrome", "value": 275.0 }])
        );
        assert_eq!(value["series"][1]["data"], json!([[1.0, 2.0]]));
        assert_eq!(value["series"][1]["type"], json!("scatter"));
    }

    #[test]
    fn multiple_axes_and_lengths_round_out_the_schema() {
        let option = ChartOption {
            y_axis: Some(OneOrMany::Many(vec![Axis::value(), Axis::value()])),
            grid: Some(Grid {
                left: Some("3%".into()),
                top: Some(12.0.into()),
                contain_label: Some(true),
                ..Grid::default()
            }),
            ..ChartOption::default()
        };
        let value = option.to_json().expect("json");
        assert_eq!(value["yAxis"].as_array().map(Vec::len), Some(2));
        assert_eq!(
            value["grid"],
            json!({ "left": "3%", "top": 12.0, "containLabel": true })
        );
    }

    #[test]
    fn option_parses_back_from_echarts_json() {
        let option: ChartOption = serde_json::from_value(json!({
            "series": [{ "type": "bar", "data": [1.0], "barWidth": "60%" }]
        }))
        .expect("option");
        let Series::Bar(bar) = &option.series[0] else {
            panic!("expected a bar series");
        };
        assert_eq!(bar.bar_width, Some(LengthValue::Text("60%".to_string())));
    }

    #[test]
    fn config_emits_css_variables_per_theme() {
        let config = ChartConfig::new()
            .with_series("desktop", "Desktop", "#2563eb")
            .with_themed_series(
                "mobile",
                "Mobile",
                ThemeColors {
                    light: "#60a5fa".to_string(),
                    dark: "#1e3a8a".to_string(),
                },
            );
        assert_eq!(
            config.css_variables(false),
            "--color-desktop: #2563eb; --color-mobile: #60a5fa;"
        );
        assert_eq!(
            config.style_rules("chart-1"),
            "[data-chart=\"chart-1\"] { --color-desktop: #2563eb; --color-mobile: #60a5fa; }\n.dark [data-chart=\"chart-1\"] { --color-desktop: #2563eb; --color-mobile: #1e3a8a; }"
        );
        assert_eq!(config.label("mobile"), "Mobile");
        assert_eq!(config.label("tablet"), "tablet");
    }

    #[test]
    fn palette_only_fills_empty_option_colors() {
        let config = ChartConfig::new().with_series("a b", "A", "red");
        let mut option = ChartOption::new();
        config.apply_palette(&mut option, false);
        assert_eq!(option.color, vec!["red".to_string()]);
        let mut custom = ChartOption::new().with_colors(["blue"]);
        config.apply_palette(&mut custom, false);
        assert_eq!(custom.color, vec!["blue".to_string()]);
        assert_eq!(config.css_variables(false), "--color-a-b: red;");
        assert_eq!(ChartConfig::color_var("a b"), "var(--color-a-b)");
    }

    #[test]
    fn palette_follows_declaration_order() {
        let config = ChartConfig::new()
            .with_series("visitors", "Visitors", "#111")
            .with_series("desktop", "Desktop", "#222");
        assert_eq!(config.palette(false), vec!["#111".to_string(), "#222".to_string()]);
        let keys: Vec<&str> = config.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["visitors", "desktop"]);

        let parsed: ChartConfig = serde_json::from_value(json!({
            "zeta": { "label": "Zeta", "color": "#333" },
            "alpha": { "label": "Alpha", "color": "#444" }
        }))
        .expect("config");
        assert_eq!(parsed.palette(true), vec!["#333".to_string(), "#444".to_string()]);
    }

    #[test]
    fn style_rules_quote_the_chart_id() {
        let config = ChartConfig::new().with_series("desktop", "Desktop", "red");
        assert_eq!(
            config.style_rules("1:chart"),
            "[data-chart=\"1:chart\"] { --color-desktop: red; }"
        );
    }
}
