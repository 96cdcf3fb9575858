//! Word lists the faker library does not ship.

/// Leading adjective of a product name.
pub const PRODUCT_ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Refined", "Tasty", "Licensed",
];

/// Material in the middle of a product name.
pub const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen", "Bronze", "Marble", "Leather", "Glass",
];

/// Trailing noun of a product name.
pub const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
    "Pizza", "Salad", "Sausages", "Chips",
];

/// Named colours.
pub const COLOR_NAMES: &[&str] = &[
    "AliceBlue", "Aqua", "Aquamarine", "Azure", "Beige", "Black", "Blue", "BlueViolet", "Brown",
    "Chartreuse", "Chocolate", "Coral", "Crimson", "Cyan", "DarkBlue", "DarkGreen", "Fuchsia",
    "Gold", "Gray", "Green", "HotPink", "Indigo", "Ivory", "Khaki", "Lavender", "Lime",
    "Magenta", "Maroon", "Navy", "Olive", "Orange", "Orchid", "Pink", "Plum", "Purple", "Red",
    "Salmon", "Silver", "SkyBlue", "Tan", "Teal", "Tomato", "Turquoise", "Violet", "White",
    "Yellow",
];
