use super::*;
use crate::test_support::record;

#[test]
fn band_boundaries_include_the_lower_bound() {
    assert_eq!(MagnitudeBand::of(3.99), MagnitudeBand::Minor);
    assert_eq!(MagnitudeBand::of(4.0), MagnitudeBand::Light);
    assert_eq!(MagnitudeBand::of(4.99), MagnitudeBand::Light);
    assert_eq!(MagnitudeBand::of(5.0), MagnitudeBand::Moderate);
    assert_eq!(MagnitudeBand::of(6.0), MagnitudeBand::Strong);
    assert_eq!(MagnitudeBand::of(7.0), MagnitudeBand::Major);
    assert_eq!(MagnitudeBand::of(9.1), MagnitudeBand::Major);
    assert_eq!(MagnitudeBand::of(-0.5), MagnitudeBand::Minor);
}

#[test]
fn band_colors_match_legend() {
    let colors: Vec<Rgb> = MagnitudeBand::ALL.iter().map(|b| b.color()).collect();

    assert_eq!(
        colors,
        vec![
            Rgb(0x4C, 0xAF, 0x50),
            Rgb(0xFF, 0xEB, 0x3B),
            Rgb(0xFF, 0x98, 0x00),
            Rgb(0xF4, 0x43, 0x36),
            Rgb(0x9C, 0x27, 0xB0),
        ]
    );
}

#[test]
fn radius_scales_linearly_with_magnitude() {
    assert_eq!(marker_radius(0.0), 0.0);
    assert_eq!(marker_radius(2.0), 6.0);
    assert_eq!(marker_radius(5.5), 16.5);
}

#[test]
fn badge_text_turns_light_only_above_five() {
    assert_eq!(badge_text_color(5.0), Rgb::BLACK);
    assert_eq!(badge_text_color(5.01), Rgb::WHITE);
    assert_eq!(Badge::for_magnitude(6.24).text, "6.2");
    assert_eq!(Badge::for_magnitude(4.0).fill, MagnitudeBand::Light.color());
}

#[test]
fn marker_popup_carries_place_magnitude_depth_and_time() {
    let mut quake = record("us1", 4.04, 12.5, 1_700_000_000_000);
    quake.location_label = "5 km W of Town".into();

    let marker = Marker::from_record(&quake);

    assert_eq!(marker.band, MagnitudeBand::Light);
    assert_eq!(marker.location, quake.location());
    assert_eq!(marker.popup.title, "5 km W of Town");
    assert_eq!(marker.popup.magnitude, "4.0");
    assert_eq!(marker.popup.depth, "12.5 km");
    assert_eq!(marker.popup.time, format_timestamp(1_700_000_000_000));
    assert_eq!(marker.popup.lines()[1], "Magnitude: 4.0");
}

#[test]
fn whole_depths_print_without_decimals() {
    assert_eq!(format_depth(10.0), "10 km");
    assert_eq!(format_depth(0.25), "0.25 km");
}

#[test]
fn empty_sections_become_no_results_placeholders() {
    let section: Section<ListEntry> = Section::from_entries(Vec::new());

    assert_eq!(section.placeholder(), Some(Placeholder::NoResults));
    assert!(section.entries().is_empty());
}

#[test]
fn view_model_replaces_previous_output() {
    let mut view = ViewModel::default();
    let first = record("a", 4.0, 1.0, 1);
    let second = record("b", 5.0, 1.0, 2);

    view.render_markers(vec![Marker::from_record(&first)]);
    view.render_markers(vec![Marker::from_record(&second)]);
    view.render_list(Section::from_entries(vec![ListEntry::from_record(&second)]));
    view.render_list(Section::from_entries(vec![ListEntry::from_record(&second)]));

    assert_eq!(view.markers.len(), 1);
    assert_eq!(view.markers[0].id, second.id);
    assert_eq!(view.list.as_ref().map(|l| l.entries().len()), Some(1));
}

#[test]
fn view_model_locates_entries_from_either_surface() {
    let mut view = ViewModel::default();
    let mut listed = record("listed", 4.0, 1.0, 1);
    listed.latitude = 10.0;
    let mut panelled = record("panelled", 4.0, 1.0, 1);
    panelled.latitude = -20.0;

    view.render_list(Section::from_entries(vec![ListEntry::from_record(&listed)]));
    view.render_panel(Section::from_entries(vec![PanelEntry::from_record(&panelled)]));

    assert_eq!(view.locate(&listed.id).map(|p| p.latitude), Some(10.0));
    assert_eq!(view.locate(&panelled.id).map(|p| p.latitude), Some(-20.0));
    assert_eq!(view.locate(&EventId::from("missing")), None);
}

#[test]
fn render_call_applies_to_any_renderer() {
    let mut view = ViewModel::default();

    RenderCall::Panel(Section::Placeholder(Placeholder::FetchFailed)).apply(&mut view);

    assert_eq!(
        view.panel.and_then(|p| p.placeholder()),
        Some(Placeholder::FetchFailed)
    );
}

#[test]
fn stats_labels() {
    let stats = Stats {
        total_count: 12,
        matched_count: 0,
        max_magnitude: 6.24,
        refreshed_at: Local::now(),
    };

    assert_eq!(stats.max_magnitude_label(), "6.2");
    assert_eq!(stats.matched_caption(), "0 earthquakes");
    assert_eq!(stats.refreshed_at_label().len(), "00:00:00".len());
}
