use std::path::Path;

use console::Style;
use loupe_core::viewport::Viewport;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    state: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            state: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

/// Print the zoom/pan state of `viewport` and what it shows.
pub fn print_viewport_summary(title: &str, path: &Path, viewport: &Viewport) {
    let s = Styles::new();
    let surface = viewport.surface();

    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{}x{}", surface.width(), surface.height()))
    );

    let (Some(display), Some(zoom), Some(level), Some(crop)) = (
        viewport.display(),
        viewport.linear_zoom(),
        viewport.zoom_level(),
        viewport.crop(),
    ) else {
        println!("  {:<14}{}", s.label.apply_to("State"), s.state.apply_to("not shown"));
        return;
    };

    println!("  {:<14}{}", s.label.apply_to("Display"), s.value.apply_to(display));
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.1}%", zoom * 100.0)),
        s.label.apply_to(format!("(level {level:.3})"))
    );
    if let Some(containment) = viewport.containment() {
        println!("  {:<14}{}", s.label.apply_to("Containment"), s.state.apply_to(containment));
    }
    let (pan_x, pan_y) = viewport.pan_offset();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pan"),
        s.value.apply_to(format!("{pan_x:.1}, {pan_y:.1}"))
    );
    let r = crop.region;
    println!(
        "  {:<14}{}",
        s.label.apply_to("Region"),
        s.value.apply_to(format!(
            "({:.1}, {:.1}) - ({:.1}, {:.1})",
            r.left, r.top, r.right, r.bottom
        ))
    );
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Output"),
        s.value.apply_to(format!("{}x{}", crop.output.width, crop.output.height)),
        s.label.apply_to(format!("({:?})", crop.filter))
    );
}
