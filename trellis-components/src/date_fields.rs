//! Compound date fields.
//!
//! ## Usage
//!
//! [`date_fields`] owns a [`CalendarDate`] and its change handler. The caller
//! decides which of [`MonthField`], [`DayField`] and [`YearField`] appear
//! inside it, in which order, with which labels and classes, and what else is
//! placed between them.
//!
//! ```
//! use trellis_ui::{Runtime, from_fn};
//! use trellis_components::date_fields::{
//!     CalendarDate, DateFieldsArgs, DayField, FieldAttrs, MonthField, YearField, date_fields,
//! };
//!
//! let mut runtime = Runtime::new(from_fn("app", |cx| {
//!     let start = cx.remember(|| CalendarDate::new(2019, 3, 1));
//!     let args = DateFieldsArgs::new(start.get())
//!         .on_change_shared(start.setter())
//!         .child(DayField::new(FieldAttrs::default().aria_label("Start Day")))
//!         .child(MonthField::new(FieldAttrs::default().aria_label("Start Month")))
//!         .child(YearField::new(2018, 2019, FieldAttrs::default().aria_label("Start year")));
//!     date_fields(cx, &args)
//! }));
//!
//! let frame = runtime.render().unwrap();
//! let year = frame.find_by_label("Start year").unwrap();
//! assert_eq!(frame.element(year).unwrap().option_values(), ["2018", "2019"]);
//! ```
use std::{fmt, str::FromStr};

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::warn;
use trellis_ui::{
    Attributes, BuildContext, BuildResult, CallbackWith, Children, Choice, Component,
    compound::{Composite, CompoundScope, Facet, compound_owner, use_compound},
};

use crate::select::{SelectArgs, select};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A day of the Gregorian calendar.
///
/// Values are not validated: a day past the end of its month is kept as-is
/// and simply has no matching option in [`DayField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate {
    /// Year, e.g. `2019`.
    pub year: i32,
    /// Month, `1` to `12`.
    pub month: u32,
    /// Day of the month, starting at `1`.
    pub day: u32,
}

impl CalendarDate {
    /// Creates a date from its parts.
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Number of days in the month of this date, or `0` for an invalid month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

impl Composite for CalendarDate {
    const OWNER: &'static str = "date_fields";
}

/// Formats as `YYYY-MM-DD`.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of `year`, or `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Month facet of a [`CalendarDate`].
#[derive(Debug, Clone, Copy)]
pub struct Month;

/// Day facet of a [`CalendarDate`].
#[derive(Debug, Clone, Copy)]
pub struct Day;

/// Year facet of a [`CalendarDate`].
#[derive(Debug, Clone, Copy)]
pub struct Year;

impl Facet<CalendarDate> for Month {
    type Value = u32;

    fn name(&self) -> &'static str {
        "month"
    }

    fn get(&self, date: &CalendarDate) -> u32 {
        date.month
    }

    fn replace(&self, date: &CalendarDate, month: u32) -> CalendarDate {
        CalendarDate { month, ..*date }
    }
}

impl Facet<CalendarDate> for Day {
    type Value = u32;

    fn name(&self) -> &'static str {
        "day"
    }

    fn get(&self, date: &CalendarDate) -> u32 {
        date.day
    }

    fn replace(&self, date: &CalendarDate, day: u32) -> CalendarDate {
        CalendarDate { day, ..*date }
    }
}

impl Facet<CalendarDate> for Year {
    type Value = i32;

    fn name(&self) -> &'static str {
        "year"
    }

    fn get(&self, date: &CalendarDate) -> i32 {
        date.year
    }

    fn replace(&self, date: &CalendarDate, year: i32) -> CalendarDate {
        CalendarDate { year, ..*date }
    }
}

/// Arguments for the [`date_fields`] owner.
#[derive(Clone, Setters)]
pub struct DateFieldsArgs {
    /// The date shown by the fields.
    pub value: CalendarDate,
    /// Receives the whole new date whenever a field changes.
    #[setters(skip)]
    pub on_change: CallbackWith<CalendarDate>,
    /// Fields and anything else, built in order.
    #[setters(skip)]
    pub children: Children,
}

impl DateFieldsArgs {
    /// Arguments showing `value` with no fields yet.
    pub fn new(value: CalendarDate) -> Self {
        Self {
            value,
            on_change: CallbackWith::noop(),
            children: Children::new(),
        }
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(CalendarDate) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<CalendarDate>>) -> Self {
        self.on_change = on_change.into();
        self
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children = self.children.child(child);
        self
    }

    /// Replaces all children.
    pub fn children(mut self, children: Children) -> Self {
        self.children = children;
        self
    }
}

/// Owner of a [`CalendarDate`] edited by the fields among its children.
///
/// Renders exactly `children`, in order. Fields look up the date and the
/// change handler by themselves; nothing is passed to them directly.
pub fn date_fields(cx: &mut BuildContext<'_>, args: &DateFieldsArgs) -> BuildResult {
    compound_owner(cx, args.value, args.on_change.clone(), &args.children)
}

/// Presentation attributes of a date field, passed to its select unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Setters)]
pub struct FieldAttrs {
    /// Element id.
    #[setters(strip_option, into)]
    pub id: Option<String>,
    /// Visible label.
    #[setters(strip_option, into)]
    pub label: Option<String>,
    /// Accessible name.
    #[setters(strip_option, into)]
    pub aria_label: Option<String>,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
}

impl FieldAttrs {
    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    fn to_attributes(&self) -> Attributes {
        Attributes {
            id: self.id.clone(),
            label: self.label.clone(),
            aria_label: self.aria_label.clone(),
            classes: self.classes.clone(),
            ..Default::default()
        }
    }
}

fn facet_select<F>(
    cx: &mut BuildContext<'_>,
    scope: &CompoundScope<CalendarDate>,
    facet: F,
    options: Vec<Choice>,
    attrs: &FieldAttrs,
) -> BuildResult
where
    F: Facet<CalendarDate>,
    F::Value: ToString + FromStr + 'static,
{
    let selected = scope.get(facet).to_string();
    let set_facet = scope.facet_setter(facet);
    let args = SelectArgs::default()
        .attrs(attrs.to_attributes())
        .options(options)
        .selected(selected)
        .on_select(move |raw: String| match raw.parse::<F::Value>() {
            Ok(value) => set_facet.call(value),
            Err(_) => warn!(facet = facet.name(), %raw, "ignoring unparseable selection"),
        });
    select(cx, &args)
}

/// Month selector, options `1` to `12` labelled with month names.
#[derive(Debug, Clone, Default)]
pub struct MonthField {
    attrs: FieldAttrs,
}

impl MonthField {
    /// Creates the field.
    pub fn new(attrs: FieldAttrs) -> Self {
        Self { attrs }
    }
}

impl Component for MonthField {
    fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult {
        let scope = use_compound::<CalendarDate>(cx, "MonthField")?;
        let options = MONTH_NAMES
            .iter()
            .zip(1u32..)
            .map(|(name, month)| Choice::new(month.to_string(), *name))
            .collect();
        facet_select(cx, &scope, Month, options, &self.attrs)
    }
}

/// Day selector, options `1` through the last day of the current month.
#[derive(Debug, Clone, Default)]
pub struct DayField {
    attrs: FieldAttrs,
}

impl DayField {
    /// Creates the field.
    pub fn new(attrs: FieldAttrs) -> Self {
        Self { attrs }
    }
}

impl Component for DayField {
    fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult {
        let scope = use_compound::<CalendarDate>(cx, "DayField")?;
        let options = (1..=scope.value().days_in_month())
            .map(|day| Choice::new(day.to_string(), day.to_string()))
            .collect();
        facet_select(cx, &scope, Day, options, &self.attrs)
    }
}

/// Year selector, options exactly `start..=end`.
///
/// The range is independent of the current year; a current year outside it
/// simply has no matching option.
#[derive(Debug, Clone)]
pub struct YearField {
    start: i32,
    end: i32,
    attrs: FieldAttrs,
}

impl YearField {
    /// Creates the field.
    pub fn new(start: i32, end: i32, attrs: FieldAttrs) -> Self {
        Self { start, end, attrs }
    }
}

impl Component for YearField {
    fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult {
        let scope = use_compound::<CalendarDate>(cx, "YearField")?;
        let options = (self.start..=self.end)
            .map(|year| Choice::new(year.to_string(), year.to_string()))
            .collect();
        facet_select(cx, &scope, Year, options, &self.attrs)
    }
}

#[cfg(test)]
mod tests {
    use trellis_ui::{
        BuildError, Frame, InputEvent, NodeId, Runtime, from_fn, testing::Recorder,
    };

    use super::*;
    use crate::text::text;

    fn fields() -> DateFieldsArgs {
        DateFieldsArgs::new(CalendarDate::new(2019, 3, 1))
            .child(MonthField::new(FieldAttrs::default().aria_label("Start Month")))
            .child(DayField::new(FieldAttrs::default().aria_label("Start Day")))
            .child(YearField::new(
                2018,
                2019,
                FieldAttrs::default().aria_label("Start year"),
            ))
    }

    fn node(frame: &Frame, label: &str) -> NodeId {
        match frame.find_by_label(label) {
            Some(id) => id,
            None => panic!("no element labelled {label:?}\n{}", frame.outline()),
        }
    }

    fn options(frame: &Frame, label: &str) -> Vec<String> {
        match frame.element(node(frame, label)) {
            Some(el) => el.option_values().into_iter().map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    fn selected(frame: &Frame, label: &str) -> Option<String> {
        frame
            .element(node(frame, label))
            .and_then(|el| el.selected())
            .map(str::to_string)
    }

    #[test]
    fn month_change_reports_whole_date() {
        let recorder = Recorder::<CalendarDate>::new();
        let args = fields().on_change_shared(recorder.callback());
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));

        let month = match runtime.render() {
            Ok(frame) => node(frame, "Start Month"),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(month, InputEvent::Select("7".into())).is_ok());
        assert_eq!(recorder.calls(), vec![CalendarDate::new(2019, 7, 1)]);
    }

    #[test]
    fn year_options_follow_bounds_only() {
        let args = DateFieldsArgs::new(CalendarDate::new(2030, 1, 1)).child(YearField::new(
            2018,
            2019,
            FieldAttrs::default().aria_label("Start year"),
        ));
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));

        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        assert_eq!(options(frame, "Start year"), ["2018", "2019"]);
        assert_eq!(selected(frame, "Start year").as_deref(), Some("2030"));
    }

    #[test]
    fn day_options_track_month_length() {
        let date = CalendarDate::new(2020, 2, 10);
        let args = DateFieldsArgs::new(date)
            .child(DayField::new(FieldAttrs::default().aria_label("day")));
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));

        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        let days = options(frame, "day");
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().map(String::as_str), Some("1"));
        assert_eq!(days.last().map(String::as_str), Some("29"));
    }

    #[test]
    fn month_options_carry_names() {
        let args = fields();
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));
        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        let Some(month) = frame.element(node(frame, "Start Month")) else {
            panic!("month select missing");
        };
        let trellis_ui::ControlValue::Choice { options, selected } = &month.value else {
            panic!("month is not a select");
        };
        assert_eq!(options.len(), 12);
        assert_eq!(options[6], Choice::new("7", "July"));
        assert_eq!(selected.as_deref(), Some("3"));
    }

    #[test]
    fn fields_render_in_caller_order_with_extras() {
        let args = DateFieldsArgs::new(CalendarDate::new(2019, 3, 1))
            .child(DayField::new(FieldAttrs::default().aria_label("d").class("day")))
            .child(from_fn("separator", |cx| text(cx, "/")))
            .child(MonthField::new(FieldAttrs::default().aria_label("m")));
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));

        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        let outline: Vec<String> = frame.elements().map(|(_, el)| el.kind.tag().to_string()).collect();
        assert_eq!(outline, ["select", "text", "select"]);
        let Some(day) = frame.element(node(frame, "d")) else {
            panic!("day select missing");
        };
        assert!(day.attrs.has_class("day"));
    }

    #[test]
    fn field_without_owner_is_rejected() {
        let mut runtime = Runtime::new(from_fn("app", |cx| {
            cx.child(&YearField::new(2018, 2019, FieldAttrs::default()))
        }));
        match runtime.render() {
            Err(err) => assert_eq!(
                err,
                BuildError::MissingScope {
                    consumer: "YearField",
                    provider: "date_fields"
                }
            ),
            Ok(frame) => panic!("expected MissingScope, got\n{}", frame.outline()),
        }
    }

    #[test]
    fn held_date_round_trips_through_state() {
        let mut runtime = Runtime::new(from_fn("app", |cx| {
            let start = cx.remember(|| CalendarDate::new(2019, 3, 1));
            let args = DateFieldsArgs::new(start.get())
                .on_change_shared(start.setter())
                .child(MonthField::new(FieldAttrs::default().aria_label("m")))
                .child(YearField::new(2018, 2019, FieldAttrs::default().aria_label("y")));
            date_fields(cx, &args)
        }));

        let year = match runtime.render() {
            Ok(frame) => node(frame, "y"),
            Err(err) => panic!("render failed: {err}"),
        };
        let generation = runtime.state_generation();
        assert!(runtime.dispatch(year, InputEvent::Select("2019".into())).is_ok());
        assert_eq!(runtime.state_generation(), generation);

        assert!(runtime.dispatch(year, InputEvent::Select("2018".into())).is_ok());
        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        assert_eq!(selected(frame, "y").as_deref(), Some("2018"));
        assert_eq!(selected(frame, "m").as_deref(), Some("3"));
    }

    #[test]
    fn garbage_selection_is_ignored() {
        let recorder = Recorder::<CalendarDate>::new();
        let args = fields().on_change_shared(recorder.callback());
        let mut runtime = Runtime::new(from_fn("app", move |cx| date_fields(cx, &args)));
        let day = match runtime.render() {
            Ok(frame) => node(frame, "Start Day"),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(day, InputEvent::Select("tenth".into())).is_ok());
        assert!(recorder.is_empty());
    }

    #[test]
    fn formats_as_iso_date() {
        assert_eq!(CalendarDate::new(2019, 3, 1).to_string(), "2019-03-01");
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2019, 13), 0);
    }
}
