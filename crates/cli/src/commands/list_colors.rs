use richfind_colors::{ThemeColor, apply_adjustment, encode_theme};

// Lightness steps shown next to each palette entry, darkest first. A shade
// keeps that share of the base lightness; a tint blends toward white by the
// remainder.
const ADJUSTMENTS: [f64; 4] = [-0.25, -0.5, 0.8, 0.4];

pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>12}  {:<7}  {}\n",
        "name", "value", "base", "shade -0.25 / -0.5, tint +0.8 / +0.4 (darkest to lightest)"
    ));

    for color in ThemeColor::ALL {
        let base = color.reference();
        let steps: Vec<String> = ADJUSTMENTS
            .iter()
            .map(|adjust| format!("#{}", apply_adjustment(base, *adjust).to_hex()))
            .collect();
        out.push_str(&format!(
            "{:<12} {:>12}  #{}  {}\n",
            color.id(),
            encode_theme(color, 0.0).raw(),
            base.to_hex(),
            steps.join(" ")
        ));
    }
    out
}
