const HEALTH_TIPS: [&str; 8] = [
    "Stay well hydrated: drink at least eight glasses of water a day.",
    "Prefer whole foods and cut down on processed food.",
    "Eat vegetables and fruit of many colours to cover a wide range of vitamins and minerals.",
    "Watch portion sizes; even healthy food can be overeaten.",
    "Eat at regular times and avoid binging after long gaps without food.",
    "Sleep enough; good sleep supports a healthy metabolism.",
    "Pair your diet with regular exercise.",
    "Reduce salt and sugar and season with herbs and spices instead.",
];

/// General advice shown alongside a generated plan.
pub fn health_tips() -> &'static [&'static str] {
    &HEALTH_TIPS
}
