use super::*;
use crate::config::{Config, KeybindingsConfig};
use crate::input::{InputSurface, Key, KeyEvent, Tool, ToolSlot};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn create_test_picker() -> ToolPicker {
    ToolPicker::from_config(&Config::default()).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Drives a picker with timestamps relative to a fixed start.
struct Harness {
    picker: ToolPicker,
    host: ToolSlot,
    start: Instant,
}

impl Harness {
    fn new() -> Self {
        Self {
            picker: create_test_picker(),
            host: ToolSlot::default(),
            start: Instant::now(),
        }
    }

    fn down(&mut self, at_ms: u64, key: Key) {
        self.picker
            .on_key_down(&mut self.host, key, self.start + ms(at_ms));
    }

    fn up(&mut self, key: Key) {
        self.picker.on_key_up(key);
    }

    fn displayed(&self) -> Tool {
        self.picker.displayed_tool(&self.host)
    }
}

#[test]
fn test_key_selects_and_reselect_deselects() {
    let mut h = Harness::new();

    h.down(0, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::Pen);

    h.down(200, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::None);
}

#[test]
fn test_bindings_are_case_insensitive() {
    let mut h = Harness::new();
    h.down(0, Key::Char('E'));
    assert_eq!(h.host.tool, Tool::Eraser);
}

#[test]
fn test_every_default_binding() {
    let expected = [
        ('p', Tool::Pen),
        ('h', Tool::Hand),
        ('e', Tool::Eraser),
        ('a', Tool::Text),
        ('l', Tool::Line),
        ('s', Tool::Square),
        ('i', Tool::Triangle),
    ];

    for (c, tool) in expected {
        let mut h = Harness::new();
        h.down(0, Key::Char(c));
        assert_eq!(h.host.tool, tool, "key {c}");
    }

    let mut h = Harness::new();
    h.host.tool = Tool::Line;
    h.down(0, Key::Char('r'));
    assert_eq!(h.host.tool, Tool::None);
}

#[test]
fn test_debounce_suppresses_burst_across_keys() {
    let mut h = Harness::new();

    h.down(0, Key::Char('p'));
    h.down(50, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Pen);
    assert_eq!(h.host.updates, 1);

    h.down(160, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Eraser);
    assert_eq!(h.host.updates, 2);
}

#[test]
fn test_debounce_measured_from_last_accepted_event() {
    let mut h = Harness::new();

    h.down(0, Key::Char('p'));
    h.down(100, Key::Char('e'));
    // 140ms after the dropped press, 240ms after the accepted one
    h.down(240, Key::Char('l'));
    assert_eq!(h.host.tool, Tool::Line);
}

#[test]
fn test_unrecognized_keys_are_noops_but_consume_the_window() {
    let mut h = Harness::new();

    h.down(0, Key::Char('z'));
    h.down(10, Key::Escape);
    h.down(20, Key::Unknown);
    assert_eq!(h.host.tool, Tool::None);
    assert_eq!(h.host.updates, 0);

    h.down(100, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::None);

    h.down(150, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::Pen);
}

#[test]
fn test_space_override_leaves_persisted_tool_alone() {
    let mut h = Harness::new();
    h.host.tool = Tool::Pen;

    h.down(0, Key::Space);
    assert_eq!(h.displayed(), Tool::Hand);
    assert_eq!(h.host.tool, Tool::Pen);
    assert_eq!(h.picker.override_state(), OverrideState::Overriding);

    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Pen);
    assert_eq!(h.host.tool, Tool::Pen);
    assert_eq!(h.host.updates, 0);
    assert_eq!(h.picker.override_state(), OverrideState::Idle);
}

#[test]
fn test_key_up_is_never_debounced() {
    let mut h = Harness::new();
    h.host.tool = Tool::Eraser;

    h.down(0, Key::Space);
    // Auto-repeat inside the window is dropped...
    h.down(30, Key::Space);
    // ...but the release still clears the override.
    h.up(Key::Space);
    assert!(!h.picker.is_overriding());
    assert_eq!(h.displayed(), Tool::Eraser);
}

#[test]
fn test_debounced_space_press_does_not_engage_override() {
    let mut h = Harness::new();

    h.down(0, Key::Char('p'));
    h.down(40, Key::Space);
    assert!(!h.picker.is_overriding());
    assert_eq!(h.displayed(), Tool::Pen);

    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Pen);
}

#[test]
fn test_release_without_press_is_safe() {
    let mut h = Harness::new();
    h.host.tool = Tool::Text;
    let _ = h.picker.take_needs_redraw();

    h.up(Key::Space);
    h.up(Key::Char('p'));
    assert_eq!(h.displayed(), Tool::Text);
    assert!(!h.picker.take_needs_redraw());
}

#[test]
fn test_selection_while_overriding_updates_persisted_tool() {
    let mut h = Harness::new();
    h.host.tool = Tool::Pen;

    h.down(0, Key::Space);
    h.down(200, Key::Char('l'));
    assert_eq!(h.host.tool, Tool::Line);
    assert_eq!(h.displayed(), Tool::Hand);

    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Line);
}

#[test]
fn test_repeated_space_press_while_held_keeps_override() {
    let mut h = Harness::new();
    h.host.tool = Tool::Pen;

    h.down(0, Key::Space);
    h.down(500, Key::Space);
    assert_eq!(h.displayed(), Tool::Hand);

    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Pen);
}

#[test]
fn test_disabled_shortcuts_ignore_presses() {
    let mut h = Harness::new();
    h.host.shortcuts_disabled = true;

    h.down(0, Key::Char('p'));
    h.down(500, Key::Space);
    h.down(1000, Key::Char('t'));
    assert_eq!(h.host.tool, Tool::None);
    assert!(!h.picker.is_overriding());
    assert!(!h.picker.panel_open());
}

#[test]
fn test_disabled_presses_do_not_touch_debounce_clock() {
    let mut h = Harness::new();

    h.host.shortcuts_disabled = true;
    h.down(0, Key::Char('e'));
    h.host.shortcuts_disabled = false;
    h.down(10, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::Pen);
}

#[test]
fn test_flag_is_reevaluated_per_event() {
    let mut h = Harness::new();

    h.down(0, Key::Char('p'));
    h.host.shortcuts_disabled = true;
    h.down(200, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Pen);

    h.host.shortcuts_disabled = false;
    h.down(400, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Eraser);
}

#[test]
fn test_release_clears_override_even_when_disabled_mid_hold() {
    let mut h = Harness::new();
    h.host.tool = Tool::Pen;

    h.down(0, Key::Space);
    h.host.shortcuts_disabled = true;
    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Pen);
}

#[test]
fn test_pointer_clicks_share_toggle_rule() {
    let mut h = Harness::new();

    assert_eq!(h.picker.on_tool_clicked(&mut h.host, Tool::Pen), Tool::Pen);
    assert_eq!(h.picker.on_tool_clicked(&mut h.host, Tool::Pen), Tool::None);

    // Keyboard then pointer on the same tool deselects
    h.down(0, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Eraser);
    assert_eq!(
        h.picker.on_tool_clicked(&mut h.host, Tool::Eraser),
        Tool::None
    );
}

#[test]
fn test_pointer_works_while_shortcuts_disabled() {
    let mut h = Harness::new();
    h.host.shortcuts_disabled = true;

    h.picker.on_tool_clicked(&mut h.host, Tool::Line);
    assert_eq!(h.host.tool, Tool::Line);
    assert!(h.picker.on_panel_toggle_clicked());
}

#[test]
fn test_panel_toggle_is_independent_of_tool() {
    let mut h = Harness::new();
    h.host.tool = Tool::Pen;

    h.down(0, Key::Char('t'));
    assert!(h.picker.panel_open());
    assert_eq!(h.host.tool, Tool::Pen);

    assert!(!h.picker.on_panel_toggle_clicked());
    h.down(200, Key::Char('T'));
    assert!(h.picker.panel_open());
    assert_eq!(h.host.updates, 0);
}

#[test]
fn test_panel_open_on_start_from_config() {
    let mut config = Config::default();
    config.panel.open_on_start = true;
    let picker = ToolPicker::from_config(&config).unwrap();
    assert!(picker.panel_open());
}

#[test]
fn test_custom_bindings_and_window() {
    let mut config = Config::default();
    config.keyboard.debounce_ms = 0;
    config.keybindings = KeybindingsConfig {
        select_pen: vec!["B".to_string()],
        momentary_hand: vec!["Space".to_string(), "M".to_string()],
        ..KeybindingsConfig::default()
    };
    let mut picker = ToolPicker::from_config(&config).unwrap();
    let mut host = ToolSlot::default();
    let now = Instant::now();

    picker.on_key_down(&mut host, Key::Char('p'), now);
    assert_eq!(host.tool, Tool::None);
    picker.on_key_down(&mut host, Key::Char('b'), now);
    assert_eq!(host.tool, Tool::Pen);

    picker.on_key_down(&mut host, Key::Char('m'), now);
    assert_eq!(picker.displayed_tool(&host), Tool::Hand);
    picker.on_key_up(Key::Char('M'));
    assert_eq!(picker.displayed_tool(&host), Tool::Pen);
}

#[test]
fn test_oversized_window_is_clamped_before_reaching_picker() {
    let mut config = Config::default();
    config.keyboard.debounce_ms = 999_999;
    let mut picker = ToolPicker::from_config(&config).unwrap();
    assert_eq!(picker.debounce_window(), ms(2000));

    let mut host = ToolSlot::default();
    let start = Instant::now();
    picker.on_key_down(&mut host, Key::Char('p'), start);
    picker.on_key_down(&mut host, Key::Char('e'), start + ms(1999));
    assert_eq!(host.tool, Tool::Pen);
    picker.on_key_down(&mut host, Key::Char('e'), start + ms(2000));
    assert_eq!(host.tool, Tool::Eraser);
}

#[test]
fn test_duplicate_bindings_rejected_by_from_config() {
    let mut config = Config::default();
    config.keybindings.toggle_panel = vec!["P".to_string()];
    assert!(ToolPicker::from_config(&config).is_err());
}

#[test]
fn test_redraw_flag_tracks_visible_changes() {
    let mut h = Harness::new();
    assert!(h.picker.take_needs_redraw());
    assert!(!h.picker.take_needs_redraw());

    h.down(0, Key::Char('z'));
    assert!(!h.picker.take_needs_redraw());

    h.down(200, Key::Space);
    assert!(h.picker.take_needs_redraw());
    h.up(Key::Space);
    assert!(h.picker.take_needs_redraw());
}

#[test]
fn test_bindings_listing_is_sorted() {
    let picker = create_test_picker();
    let bindings = picker.bindings();
    let keys: Vec<&str> = bindings.iter().map(|(b, _)| b.key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.len(), 10);
}

#[test]
fn test_full_scenario() {
    let mut h = Harness::new();
    assert_eq!(h.host.tool, Tool::None);

    h.down(0, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::Pen);

    h.down(200, Key::Char('p'));
    assert_eq!(h.host.tool, Tool::None);

    h.down(400, Key::Char('e'));
    assert_eq!(h.host.tool, Tool::Eraser);

    h.down(600, Key::Space);
    assert_eq!(h.displayed(), Tool::Hand);
    assert_eq!(h.host.tool, Tool::Eraser);

    h.up(Key::Space);
    assert_eq!(h.displayed(), Tool::Eraser);
}

// =============================================================================
// Mounted picker
// =============================================================================

fn mount_default(surface: &InputSurface) -> MountedPicker<ToolSlot> {
    MountedPicker::mount(
        surface,
        create_test_picker(),
        Rc::new(RefCell::new(ToolSlot::default())),
    )
}

#[test]
fn test_mount_receives_surface_events() {
    let surface = InputSurface::new();
    let mounted = mount_default(&surface);
    let start = Instant::now();

    surface.dispatch(KeyEvent::down(Key::Char('e'), start));
    assert_eq!(mounted.persisted_tool(), Tool::Eraser);

    surface.dispatch(KeyEvent::down(Key::Space, start + ms(200)));
    assert_eq!(mounted.displayed_tool(), Tool::Hand);
    assert!(mounted.is_overriding());

    surface.dispatch(KeyEvent::up(Key::Space, start + ms(210)));
    assert_eq!(mounted.displayed_tool(), Tool::Eraser);
}

#[test]
fn test_mount_pointer_path() {
    let surface = InputSurface::new();
    let mounted = mount_default(&surface);

    assert_eq!(mounted.click_tool(Tool::Text), Tool::Text);
    assert_eq!(mounted.click_tool(Tool::Text), Tool::None);
    assert!(mounted.click_panel_toggle());
    assert!(mounted.panel_open());
    assert_eq!(mounted.host().borrow().updates, 2);
}

#[test]
fn test_unmount_detaches_listeners() {
    let surface = InputSurface::new();
    let host = Rc::new(RefCell::new(ToolSlot::default()));
    let mounted = MountedPicker::mount(&surface, create_test_picker(), Rc::clone(&host));
    assert_eq!(surface.listener_count(), 2);

    mounted.unmount();
    assert_eq!(surface.listener_count(), 0);

    let delivered = surface.dispatch(KeyEvent::down(Key::Char('p'), Instant::now()));
    assert_eq!(delivered, 0);
    assert_eq!(host.borrow().tool, Tool::None);
    // No closure keeps the host alive after teardown
    assert_eq!(Rc::strong_count(&host), 1);
}

#[test]
fn test_remounting_does_not_accumulate_listeners() {
    let surface = InputSurface::new();
    for _ in 0..3 {
        let mounted = mount_default(&surface);
        assert_eq!(surface.listener_count(), 2);
        drop(mounted);
    }
    assert_eq!(surface.listener_count(), 0);
}

#[test]
fn test_two_mounts_have_independent_clocks() {
    let surface = InputSurface::new();
    let first = mount_default(&surface);
    let second = mount_default(&surface);
    let start = Instant::now();

    surface.dispatch(KeyEvent::down(Key::Char('p'), start));
    assert_eq!(first.persisted_tool(), Tool::Pen);
    assert_eq!(second.persisted_tool(), Tool::Pen);

    drop(first);
    surface.dispatch(KeyEvent::down(Key::Char('l'), start + ms(200)));
    assert_eq!(second.persisted_tool(), Tool::Line);
    assert_eq!(surface.listener_count(), 2);
}
