pub const TRAVEL_TIPS: [&str; 4] = [
    "Check passport validity (6+ months)",
    "Make copies of important documents",
    "Register with your embassy",
    "Get travel insurance",
];

pub const QUICK_QUESTIONS: [&str; 3] = [
    "Visa requirements for Japan?",
    "Vaccines needed for Brazil?",
    "COVID rules for Europe?",
];
