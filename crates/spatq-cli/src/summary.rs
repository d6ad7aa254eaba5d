use console::Style;
use spatq_core::config::QuantizeConfig;

use crate::commands::quantize::QuantizeArgs;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(args: &QuantizeArgs, config: &QuantizeConfig, seed: u64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Spatial Quantization"));
    println!(
        "  {}",
        s.title.apply_to(
            "\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"
        )
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(args.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(args.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", args.width, args.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Colors"),
        s.value.apply_to(args.colors)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Filter"),
        s.value.apply_to(format!("{0}x{0}", config.filter_size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Temperature"),
        s.value.apply_to(format!(
            "{} \u{2192} {}",
            config.schedule.initial_temperature, config.schedule.final_temperature
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Seed"),
        s.value.apply_to(seed)
    );
    println!();
}
