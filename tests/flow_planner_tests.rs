//! Behavioural tests for the flow planner over documents of varied shape.

use cheatsheet::layout::{
    estimate_pages, estimate_pages_with_geometry, plan, plan_with_geometry, DrawOp, DrawOpKind,
    FlowPlan, Half, PageGeometry,
};
use cheatsheet::models::{
    default_layout_config, Document, Entry, LayoutConfig, Section, SectionContent, Subsection,
};

const EPSILON: f32 = 0.01;

fn entries(prefix: &str, count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry::new(format!("{prefix}+{i}"), format!("Action {i}")).unwrap())
        .collect()
}

fn subsections(prefix: &str, count: usize, rows: usize) -> Vec<Subsection> {
    (0..count)
        .map(|i| Subsection::new(format!("{prefix} group {i}"), entries(prefix, rows)).unwrap())
        .collect()
}

/// Layout with unit sizes that are easy to reason about.
fn test_layout() -> LayoutConfig {
    let mut layout = default_layout_config();
    layout.row_height = 10.0;
    layout.margin = 0.0;
    layout
}

fn document(layout: LayoutConfig, sections: Vec<Section>) -> Document {
    Document::new("Planner", layout, sections).unwrap()
}

/// Documents of different shapes: direct rows, grouped, mixed and long sections.
fn shaped_documents() -> Vec<Document> {
    let mixed = |name: &str, direct: usize, groups: usize, rows: usize| {
        Section::new(
            name,
            SectionContent::Mixed(entries(name, direct), subsections(name, groups, rows)),
        )
        .unwrap()
    };
    let direct = |name: &str, rows: usize| {
        Section::new(name, SectionContent::DirectEntries(entries(name, rows))).unwrap()
    };
    let grouped = |name: &str, groups: usize, rows: usize| {
        Section::new(name, SectionContent::Grouped(subsections(name, groups, rows))).unwrap()
    };

    let mut no_flush = test_layout();
    no_flush.section_align_flush = false;

    vec![
        document(test_layout(), vec![direct("Only", 3)]),
        document(
            test_layout(),
            vec![direct("Moves", 25), grouped("Edit", 3, 7), mixed("Files", 4, 2, 9)],
        ),
        document(
            test_layout(),
            (0..12)
                .map(|i| mixed(&format!("S{i}"), 1 + i % 4, 1 + i % 3, 3 + i))
                .collect(),
        ),
        document(
            no_flush,
            (0..9).map(|i| grouped(&format!("G{i}"), 2, 5 + i)).collect(),
        ),
        document(test_layout(), vec![direct("Long", 120)]),
    ]
}

/// Geometries with slots tall enough for any header plus its first row.
fn geometries() -> Vec<PageGeometry> {
    let mut geometries = Vec::new();
    for height in [90.0, 151.0, 333.0] {
        for columns in [1, 2, 4] {
            for split in [false, true] {
                geometries.push(PageGeometry::new(400.0, height, 0.0, columns, split, 0.0).unwrap());
            }
        }
    }
    geometries
}

/// Splits the plan into runs of content ops sharing one slot.
fn slot_runs<'p, 'a>(plan: &'p FlowPlan<'a>) -> Vec<Vec<&'p DrawOp<'a>>> {
    let mut runs: Vec<Vec<&DrawOp<'_>>> = Vec::new();
    for op in plan.ops.iter().filter(|op| !op.is_break()) {
        match runs.last_mut() {
            Some(run) if run[0].at.slot() == op.at.slot() => run.push(op),
            _ => runs.push(vec![op]),
        }
    }
    runs
}

fn kinds(plan: &FlowPlan<'_>) -> Vec<&'static str> {
    plan.ops
        .iter()
        .map(|op| match op.kind {
            DrawOpKind::SectionHeader { .. } => "section",
            DrawOpKind::SubsectionHeader { .. } => "subsection",
            DrawOpKind::EntryRow { .. } => "row",
            DrawOpKind::ColumnBreak => "column_break",
            DrawOpKind::PageBreak => "page_break",
        })
        .collect()
}

fn offsets(plan: &FlowPlan<'_>) -> Vec<f32> {
    plan.ops.iter().map(|op| op.at.y).collect()
}

#[test]
fn test_planning_is_deterministic() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let first = plan_with_geometry(&doc, &geometry).unwrap();
            let second = plan_with_geometry(&doc, &geometry).unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_estimator_matches_planner() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let plan = plan_with_geometry(&doc, &geometry).unwrap();
            let estimate = estimate_pages_with_geometry(&doc, &geometry).unwrap();
            assert_eq!(estimate, plan.total_page_count);
        }

        assert_eq!(estimate_pages(&doc).unwrap(), plan(&doc).unwrap().total_page_count);
    }
}

#[test]
fn test_no_slot_ends_with_a_header() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let plan = plan_with_geometry(&doc, &geometry).unwrap();
            for run in slot_runs(&plan) {
                let last = run.last().unwrap();
                assert!(
                    !last.is_header(),
                    "header {:?} left alone at the bottom of slot {:?}",
                    last.kind,
                    last.at.slot()
                );
            }
        }
    }
}

#[test]
fn test_headers_are_followed_in_their_slot() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let plan = plan_with_geometry(&doc, &geometry).unwrap();
            for pair in plan.ops.windows(2) {
                if pair[0].is_header() {
                    assert!(!pair[1].is_break());
                    assert_eq!(pair[0].at.slot(), pair[1].at.slot());
                }
            }
        }
    }
}

#[test]
fn test_offsets_and_pages_are_monotonic() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let plan = plan_with_geometry(&doc, &geometry).unwrap();

            for pair in plan.ops.windows(2) {
                assert!(pair[0].at.page <= pair[1].at.page);
            }

            for run in slot_runs(&plan) {
                for pair in run.windows(2) {
                    assert!(pair[0].at.y <= pair[1].at.y);
                    assert!(pair[0].at.y + pair[0].height() <= pair[1].at.y + EPSILON);
                }
            }

            let last_page = plan.ops.last().map_or(0, |op| op.at.page);
            assert_eq!(plan.total_page_count, last_page + 1);
        }
    }
}

#[test]
fn test_units_stay_inside_their_slot() {
    for doc in shaped_documents() {
        for geometry in geometries() {
            let plan = plan_with_geometry(&doc, &geometry).unwrap();
            for op in plan.ops.iter().filter(|op| !op.is_break()) {
                let limit = geometry.slot_height(op.at.page, op.at.half);
                assert!(op.at.y + op.height() <= limit + EPSILON);
                assert!(op.at.column < geometry.column_count());
            }
        }
    }
}

#[test]
fn test_every_unit_is_emitted_once_in_order() {
    for doc in shaped_documents() {
        let plan = plan_with_geometry(&doc, &geometries()[0]).unwrap();

        let rows: Vec<&str> = plan
            .ops
            .iter()
            .filter_map(|op| match op.kind {
                DrawOpKind::EntryRow { key, .. } => Some(key),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = doc
            .sections
            .iter()
            .flat_map(|section| {
                section
                    .content
                    .direct_entries()
                    .iter()
                    .chain(section.content.subsections().iter().flat_map(|s| &s.entries))
            })
            .map(|entry| entry.key.as_str())
            .collect();
        assert_eq!(rows, expected);

        let section_headers = plan
            .ops
            .iter()
            .filter(|op| matches!(op.kind, DrawOpKind::SectionHeader { .. }))
            .count();
        assert_eq!(section_headers, doc.sections.len());
    }
}

#[test]
fn test_empty_document() {
    let doc = document(test_layout(), Vec::new());

    let plan = plan(&doc).unwrap();
    assert!(plan.ops.is_empty());
    assert_eq!(plan.total_page_count, 1);
    assert_eq!(estimate_pages(&doc).unwrap(), 1);
}

fn scenario_document() -> Document {
    let mut layout = test_layout();
    layout.columns = 1;
    layout.section_spacing = 0.0;
    let subsection = Subsection::new("Basics", entries("Ctrl", 3)).unwrap();
    document(
        layout,
        vec![Section::new("Editing", SectionContent::Grouped(vec![subsection])).unwrap()],
    )
}

#[test]
fn test_scenario_everything_fits_one_slot() {
    let doc = scenario_document();
    let geometry = PageGeometry::new(200.0, 100.0, 0.0, 1, false, 0.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    assert_eq!(
        kinds(&plan),
        vec!["section", "subsection", "row", "row", "row"]
    );
    assert_eq!(offsets(&plan), vec![0.0, 12.0, 22.0, 32.0, 42.0]);
    assert!(plan
        .ops
        .iter()
        .all(|op| op.at.page == 0 && op.at.column == 0 && op.at.half == Half::Full));
    assert_eq!(plan.total_page_count, 1);
}

#[test]
fn test_scenario_short_slot_forces_break() {
    let doc = scenario_document();
    let geometry = PageGeometry::new(200.0, 35.0, 0.0, 1, false, 0.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    let kinds = kinds(&plan);

    let third_row = kinds
        .iter()
        .enumerate()
        .filter(|(_, kind)| **kind == "row")
        .nth(2)
        .map(|(index, _)| index)
        .unwrap();
    assert!(kinds[..third_row]
        .iter()
        .any(|kind| *kind == "page_break" || *kind == "column_break"));

    // Headers and the first row take 32pt of 35; the rest moves to page 1
    assert_eq!(
        kinds,
        vec!["section", "subsection", "row", "page_break", "row", "row"]
    );
    assert_eq!(plan.total_page_count, 2);
}

#[test]
fn test_scenario_top_half_flows_into_bottom_half() {
    let mut layout = test_layout();
    layout.columns = 1;
    let doc = document(
        layout,
        vec![Section::new("Long", SectionContent::DirectEntries(entries("k", 10))).unwrap()],
    );
    // 50pt halves: header and 3 rows on top, 5 rows below, 2 on the next page
    let geometry = PageGeometry::new(200.0, 100.0, 0.0, 1, true, 0.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    let slots: Vec<(usize, usize, Half)> = plan
        .ops
        .iter()
        .filter(|op| !op.is_break())
        .map(|op| op.at.slot())
        .collect();

    let top = slots.iter().filter(|s| **s == (0, 0, Half::Top)).count();
    let bottom = slots.iter().filter(|s| **s == (0, 0, Half::Bottom)).count();
    assert_eq!(top, 4);
    assert_eq!(bottom, 5);

    // The move to the bottom half is not a break
    let first_break = plan.ops.iter().position(DrawOp::is_break).unwrap();
    assert_eq!(first_break, 9);
    assert!(matches!(plan.ops[first_break].kind, DrawOpKind::PageBreak));
    assert_eq!(plan.ops[first_break].at.half, Half::Top);
    assert_eq!(plan.total_page_count, 2);
}

#[test]
fn test_scenario_bottom_half_then_next_column() {
    let mut layout = test_layout();
    layout.columns = 2;
    let doc = document(
        layout,
        vec![Section::new("Long", SectionContent::DirectEntries(entries("k", 10))).unwrap()],
    );
    let geometry = PageGeometry::new(200.0, 100.0, 0.0, 2, true, 0.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    let breaks: Vec<&DrawOp<'_>> = plan.ops.iter().filter(|op| op.is_break()).collect();

    assert_eq!(breaks.len(), 1);
    assert!(matches!(breaks[0].kind, DrawOpKind::ColumnBreak));
    assert_eq!(breaks[0].at.slot(), (0, 1, Half::Top));

    let last = plan.ops.last().unwrap();
    assert_eq!(last.at.slot(), (0, 1, Half::Top));
    assert!((last.at.y - 10.0).abs() < EPSILON);
    assert_eq!(plan.total_page_count, 1);
}

#[test]
fn test_title_band_only_shrinks_first_page() {
    let mut layout = test_layout();
    layout.columns = 1;
    let doc = document(
        layout,
        vec![Section::new("Long", SectionContent::DirectEntries(entries("k", 30))).unwrap()],
    );
    let band = 28.0;
    let geometry = PageGeometry::new(200.0, 100.0, 0.0, 1, false, band).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    let rows_on = |page: usize| {
        plan.ops
            .iter()
            .filter(|op| op.at.page == page && matches!(op.kind, DrawOpKind::EntryRow { .. }))
            .count()
    };

    // Page 0 has 72pt: header (12) + 6 rows; page 1 has the full 100pt
    assert_eq!(rows_on(0), 6);
    assert_eq!(rows_on(1), 10);
}

fn orphan_document(no_awkward_breaks: bool) -> Document {
    let mut layout = test_layout();
    layout.columns = 1;
    layout.section_spacing = 0.0;
    layout.section_no_awkward_breaks = no_awkward_breaks;
    document(
        layout,
        vec![
            Section::new("A", SectionContent::DirectEntries(entries("a", 2))).unwrap(),
            Section::new("B", SectionContent::DirectEntries(entries("b", 1))).unwrap(),
        ],
    )
}

#[test]
fn test_header_stays_with_first_row_across_page() {
    let geometry = PageGeometry::new(200.0, 45.0, 0.0, 1, false, 0.0).unwrap();

    // A ends at 32; B's header (12) fits in the 13pt left but its first row does not
    let document = orphan_document(true);
    let plan = plan_with_geometry(&document, &geometry).unwrap();
    assert_eq!(
        kinds(&plan),
        vec!["section", "row", "row", "page_break", "section", "row"]
    );
    assert_eq!(plan.ops[4].at.page, 1);
    assert_eq!(offsets(&plan)[4..], [0.0, 12.0]);
}

#[test]
fn test_header_may_be_stranded_without_orphan_control() {
    let geometry = PageGeometry::new(200.0, 45.0, 0.0, 1, false, 0.0).unwrap();

    let document = orphan_document(false);
    let plan = plan_with_geometry(&document, &geometry).unwrap();
    assert_eq!(
        kinds(&plan),
        vec!["section", "row", "row", "section", "page_break", "row"]
    );
    assert_eq!(plan.ops[3].at.page, 0);
    assert!((plan.ops[3].at.y - 32.0).abs() < EPSILON);
    assert_eq!(plan.ops[5].at.page, 1);
    assert!(plan.ops[5].at.y.abs() < EPSILON);
    assert_eq!(
        estimate_pages_with_geometry(&orphan_document(false), &geometry).unwrap(),
        plan.total_page_count
    );
}

#[test]
fn test_title_band_covering_top_half_skips_to_bottom_half() {
    let mut layout = test_layout();
    layout.columns = 1;
    let doc = document(
        layout,
        vec![Section::new("A", SectionContent::DirectEntries(entries("a", 1))).unwrap()],
    );
    // Halves are 30pt tall and the band eats all of the first top half
    let geometry = PageGeometry::new(200.0, 60.0, 0.0, 1, true, 30.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    assert_eq!(kinds(&plan), vec!["section", "row"]);
    for op in &plan.ops {
        assert_eq!((op.at.page, op.at.column, op.at.half), (0, 0, Half::Bottom));
    }
    assert_eq!(offsets(&plan), vec![0.0, 12.0]);
    assert_eq!(plan.total_page_count, 1);
    assert_eq!(estimate_pages_with_geometry(&doc, &geometry).unwrap(), 1);
}

#[test]
fn test_title_band_covering_full_column_moves_to_next_page() {
    let mut layout = test_layout();
    layout.columns = 1;
    let doc = document(
        layout,
        vec![Section::new("A", SectionContent::DirectEntries(entries("a", 1))).unwrap()],
    );
    let geometry = PageGeometry::new(200.0, 40.0, 0.0, 1, false, 50.0).unwrap();

    let plan = plan_with_geometry(&doc, &geometry).unwrap();
    assert_eq!(kinds(&plan), vec!["page_break", "section", "row"]);
    assert!(plan.ops[1..].iter().all(|op| op.at.page == 1));
    assert_eq!(plan.total_page_count, 2);
}
