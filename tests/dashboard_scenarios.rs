use prism_dashboard::models::{Department, Dfg, Role};
use prism_dashboard::render::{self, HtmlRenderer, MarkdownRenderer, Theme};
use prism_dashboard::roster::roster;
use prism_dashboard::{generate_metrics, Dashboard, DashboardView, Dimension, FilterSelection};
use rstest::rstest;

fn names(selection: &FilterSelection) -> Vec<&'static str> {
    Dashboard::new(selection)
        .filtered_users()
        .iter()
        .map(|user| user.name)
        .collect()
}

#[test]
fn empty_selection_is_a_no_op() {
    let selection = FilterSelection::default();
    let users = Dashboard::new(&selection).filtered_users();
    assert_eq!(users.as_slice(), roster());
}

#[rstest]
#[case(FilterSelection::default().toggled_department(Department::Urology), Some(Dimension::Dept))]
#[case(FilterSelection::default().toggled_role(Role::Provider), Some(Dimension::Role))]
#[case(
    FilterSelection::default()
        .toggled_role(Role::Provider)
        .toggled_department(Department::Cardiology),
    Some(Dimension::Dept)
)]
#[case(
    FilterSelection::default()
        .toggled_department(Department::SmilowCancerCenter)
        .toggled_dfg(Dfg::Gi),
    Some(Dimension::Dfg)
)]
#[case(FilterSelection::default().toggled_user("Tom Bradley"), None)]
fn grouping_follows_precedence(
    #[case] selection: FilterSelection,
    #[case] expected: Option<Dimension>,
) {
    assert_eq!(Dashboard::new(&selection).grouping_dimension(), expected);
}

#[rstest]
#[case(
    FilterSelection::default().toggled_department(Department::Urology),
    &["Dr. Emily Park", "Tom Bradley", "Jake Morrison"]
)]
#[case(
    FilterSelection::default().toggled_role(Role::Provider).toggled_dfg(Dfg::Gi),
    &["Dr. Sarah Chen"]
)]
#[case(
    FilterSelection::default()
        .toggled_dfg(Dfg::Thoracic)
        .toggled_dfg(Dfg::Breast),
    &["Tom Bradley", "Aisha Patel", "Nina Gonzalez", "Dr. Lisa Wang"]
)]
#[case(
    FilterSelection::default()
        .toggled_department(Department::Neurology)
        .toggled_role(Role::Provider),
    &[] as &[&str]
)]
fn filtered_sets(#[case] selection: FilterSelection, #[case] expected: &[&str]) {
    assert_eq!(names(&selection), expected);
}

#[test]
fn adding_filter_values_never_grows_the_result() {
    let steps = [
        FilterSelection::default(),
        FilterSelection::default().toggled_department(Department::SmilowCancerCenter),
        FilterSelection::default()
            .toggled_department(Department::SmilowCancerCenter)
            .toggled_role(Role::Provider),
        FilterSelection::default()
            .toggled_department(Department::SmilowCancerCenter)
            .toggled_role(Role::Provider)
            .toggled_dfg(Dfg::Gu),
        FilterSelection::default()
            .toggled_department(Department::SmilowCancerCenter)
            .toggled_role(Role::Provider)
            .toggled_dfg(Dfg::Gu)
            .toggled_user("Dr. Sarah Chen"),
    ];
    let counts: Vec<usize> = steps.iter().map(|s| names(s).len()).collect();
    assert_eq!(counts, [12, 4, 3, 1, 0]);
    assert!(counts.windows(2).all(|pair| pair[1] <= pair[0]));
}

#[test]
fn golden_parity_for_first_user() {
    let snapshot = generate_metrics(1);
    assert_eq!(snapshot.status_changed, 16 + 6 + 26 + 11 + 5 + 28);
    assert_eq!(snapshot.screened_per_active_user, "30.7");
}

#[test]
fn recomputation_is_bit_identical() {
    let selection = FilterSelection::default()
        .toggled_dfg(Dfg::Gi)
        .toggled_role(Role::NonProvider);
    let build = || serde_json::to_string(&DashboardView::build(&Dashboard::new(&selection)));
    let first = build().unwrap();
    let second = build().unwrap();
    assert_eq!(first, second);
}

#[test]
fn both_themes_render_the_same_numbers() {
    let selection = FilterSelection::default().toggled_department(Department::Cardiology);
    let view = DashboardView::build(&Dashboard::new(&selection));
    let prism = render::render_dashboard(&HtmlRenderer::new(Theme::PRISM), &view);
    let classic = render::render_dashboard(&HtmlRenderer::new(Theme::CLASSIC), &view);
    assert_ne!(prism, classic);
    for rate in &view.rates {
        assert!(prism.contains(&rate.value));
        assert!(classic.contains(&rate.value));
    }
}

#[test]
fn markdown_report_covers_every_section() {
    let view = DashboardView::build(&Dashboard::new(&FilterSelection::default()));
    let text = render::render_dashboard(&MarkdownRenderer, &view);
    for heading in [
        "# Prism Usage Dashboard",
        "## Filters",
        "## Summary",
        "## User Activity",
        "## Distribution",
        "## Derived Rates",
        "## Appointments",
        "## DAU Trends",
    ] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert!(text.contains("Window: 2026-01-18 to 2026-02-17"));
    assert!(text.contains("- **Recommended Rate**: 12.2% (Good Match / Total)"));
    assert!(text.contains("- **Avg Screened/Day**: 37.6 (Per active user)"));
}

#[test]
fn csv_export_reads_back_through_csv_reader() {
    let selection = FilterSelection::default().toggled_role(Role::Provider);
    let dashboard = Dashboard::new(&selection);
    let file = tempfile::NamedTempFile::new().unwrap();
    let written = render::write_metrics_csv(file.as_file(), &dashboard).unwrap();
    assert_eq!(written, 5);

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("group"));
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|record| record.get(0) == Some("Provider")));
    assert_eq!(records[0].get(2), Some("Dr. Sarah Chen"));
}
