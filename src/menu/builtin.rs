use super::{MenuCategory, MenuItem, SpiceLevel, WinePairing};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(super) fn items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: "butter-chicken".to_string(),
            name: "Butter Chicken".to_string(),
            description: "Tender tandoor-cooked chicken in rich tomato-butter gravy".to_string(),
            price: 24.99,
            category: MenuCategory::Curries,
            cuisine: "indian".to_string(),
            spice_level: SpiceLevel::Medium,
            dietary_info: strings(&["gluten-free"]),
            allergens: strings(&["milk"]),
            aliases: strings(&["murgh makhani"]),
            wine_pairings: vec![WinePairing {
                varietal: "Riesling".to_string(),
                origin: "Mosel, Germany".to_string(),
            }],
            popular: true,
        },
        MenuItem {
            id: "masala-dosa".to_string(),
            name: "Masala Dosa".to_string(),
            description: "Crispy rice crepe filled with spiced potatoes".to_string(),
            price: 16.99,
            category: MenuCategory::Starters,
            cuisine: "indian".to_string(),
            spice_level: SpiceLevel::Medium,
            dietary_info: strings(&["vegetarian", "vegan", "gluten-free"]),
            allergens: vec![],
            aliases: strings(&["dosa"]),
            wine_pairings: vec![],
            popular: true,
        },
        MenuItem {
            id: "birria-tacos".to_string(),
            name: "Birria Tacos".to_string(),
            description: "Slow-cooked beef tacos with consommé".to_string(),
            price: 18.99,
            category: MenuCategory::Tacos,
            cuisine: "mexican".to_string(),
            spice_level: SpiceLevel::Medium,
            dietary_info: vec![],
            allergens: strings(&["wheat"]),
            aliases: strings(&["tacos", "taco"]),
            wine_pairings: vec![WinePairing {
                varietal: "Tempranillo".to_string(),
                origin: "Rioja, Spain".to_string(),
            }],
            popular: true,
        },
        MenuItem {
            id: "classic-burger".to_string(),
            name: "Classic Burger".to_string(),
            description: "Angus beef patty with fresh toppings".to_string(),
            price: 15.99,
            category: MenuCategory::Burgers,
            cuisine: "american".to_string(),
            spice_level: SpiceLevel::None,
            dietary_info: vec![],
            allergens: strings(&["wheat", "dairy"]),
            aliases: strings(&["burger", "cheeseburger"]),
            wine_pairings: vec![WinePairing {
                varietal: "Zinfandel".to_string(),
                origin: "Sonoma, USA".to_string(),
            }],
            popular: true,
        },
        MenuItem {
            id: "margherita-pizza".to_string(),
            name: "Margherita Pizza".to_string(),
            description: "Wood-fired pizza with san marzano tomato, mozzarella and basil".to_string(),
            price: 17.49,
            category: MenuCategory::Pizza,
            cuisine: "italian".to_string(),
            spice_level: SpiceLevel::None,
            dietary_info: strings(&["vegetarian"]),
            allergens: strings(&["wheat", "dairy"]),
            aliases: strings(&["pizza", "margherita"]),
            wine_pairings: vec![WinePairing {
                varietal: "Chianti".to_string(),
                origin: "Tuscany, Italy".to_string(),
            }],
            popular: false,
        },
        MenuItem {
            id: "mango-lassi".to_string(),
            name: "Mango Lassi".to_string(),
            description: "Chilled yogurt drink blended with alphonso mango".to_string(),
            price: 5.99,
            category: MenuCategory::Beverages,
            cuisine: "indian".to_string(),
            spice_level: SpiceLevel::None,
            dietary_info: strings(&["vegetarian"]),
            allergens: strings(&["milk"]),
            aliases: strings(&["lassi"]),
            wine_pairings: vec![],
            popular: false,
        },
        MenuItem {
            id: "gulab-jamun".to_string(),
            name: "Gulab Jamun".to_string(),
            description: "Warm milk dumplings soaked in cardamom syrup".to_string(),
            price: 7.49,
            category: MenuCategory::Desserts,
            cuisine: "indian".to_string(),
            spice_level: SpiceLevel::None,
            dietary_info: strings(&["vegetarian"]),
            allergens: strings(&["milk", "wheat"]),
            aliases: strings(&["jamun"]),
            wine_pairings: vec![],
            popular: false,
        },
    ]
}
