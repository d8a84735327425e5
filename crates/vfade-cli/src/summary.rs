use console::Style;
use vfade_core::pipeline::config::PipelineConfig;
use vfade_core::pipeline::PipelineSummary;
use vfade_core::transition::FadeDirection;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("vfade"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(5)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    if let Some(raw) = config.raw {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Raw"),
            s.value
                .apply_to(format!("{} {}x{}", raw.format, raw.width, raw.height))
        );
    }
    let slicing = match config.slice_height {
        Some(rows) => format!("{rows}-row slices"),
        None => "whole frame".to_string(),
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Blend"),
        s.method.apply_to(format!(
            "{slicing}{}",
            if config.parallel { ", parallel" } else { "" }
        ))
    );
    if let Some(limit) = config.limit {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Limit"),
            s.value.apply_to(format!("{limit} frames"))
        );
    }
    println!();

    if config.fades.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Fades"),
            s.disabled.apply_to("none (pass-through)")
        );
    } else {
        println!("  {}", s.header.apply_to("Fades"));
        for (i, fade) in config.fades.iter().map(|f| f.normalized()).enumerate() {
            let direction = match fade.direction {
                FadeDirection::In => "in ",
                FadeDirection::Out => "out",
            };
            println!(
                "    {}. {} {}",
                s.label.apply_to(i + 1),
                s.method.apply_to(direction),
                s.value.apply_to(format!(
                    "frames {}..{} ({} frames)",
                    fade.start_frame,
                    fade.start_frame.saturating_add(fade.duration_frames),
                    fade.duration_frames
                ))
            );
        }
    }
    println!();
}

pub fn print_run_result(summary: &PipelineSummary, config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Stream"),
        s.value.apply_to(format!(
            "{} {} {}x{}",
            summary.container, summary.format, summary.width, summary.height
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(summary.frames)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Faded"),
        s.value.apply_to(summary.faded_frames)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(config.output.display())
    );
    println!();
}
