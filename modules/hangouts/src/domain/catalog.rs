//! Built-in activity catalog.

use crate::contract::model::Activity;

// (name, category, duration, location, description)
const CATALOG: [(&str, &str, u32, &str, &str); 32] = [
    // Study & academic
    ("Coffee & Study Session", "Study", 120, "Local Coffee Shop", "Grab coffee and study together"),
    ("Library Study Group", "Study", 180, "University Library", "Collaborative study session"),
    ("Campus Tour", "Academic", 90, "Purdue Campus", "Explore campus landmarks and history"),
    // Entertainment
    ("Movie Night", "Entertainment", 180, "Cinema or Home", "Watch a movie together"),
    ("Netflix & Chill", "Entertainment", 120, "Home", "Binge-watch your favorite series"),
    ("Concert or Live Music", "Entertainment", 240, "Concert Venue", "Enjoy live music together"),
    ("Podcast Recording", "Media", 90, "Recording Studio", "Create content together"),
    // Gaming & technology
    ("Gaming Session", "Gaming", 240, "Home or Gaming Cafe", "Play video games together"),
    ("VR Experience", "Technology", 120, "VR Arcade", "Explore virtual reality worlds"),
    ("Escape Room Challenge", "Games", 90, "Escape Room", "Solve puzzles and escape together"),
    ("Board Game Night", "Games", 180, "Home or Cafe", "Play board games together"),
    // Outdoor
    ("Hiking Adventure", "Outdoor", 300, "Local Trail", "Explore nature together"),
    ("Picnic in the Park", "Outdoor", 150, "Local Park", "Enjoy food and nature"),
    ("Bike Ride", "Outdoor", 120, "Bike Trails", "Cycling adventure around town"),
    ("Photography Walk", "Outdoor", 180, "Downtown or Campus", "Capture memories together"),
    ("Stargazing", "Outdoor", 120, "Observatory or Open Field", "Watch the stars and planets"),
    // Food
    ("Cooking Together", "Food", 150, "Kitchen", "Prepare a meal together"),
    ("Food Truck Tour", "Food", 180, "Food Truck Park", "Try different cuisines"),
    ("Baking Challenge", "Food", 120, "Kitchen", "Bake cookies or desserts"),
    ("Restaurant Hopping", "Food", 240, "Multiple Restaurants", "Try appetizers at different places"),
    // Sports
    ("Basketball Game", "Sports", 120, "Campus Gym", "Play basketball together"),
    ("Rock Climbing", "Sports", 180, "Climbing Gym", "Challenge yourselves on the wall"),
    ("Swimming", "Sports", 90, "Pool", "Swim laps or play water games"),
    ("Tennis Match", "Sports", 120, "Tennis Courts", "Play tennis together"),
    // Arts & culture
    ("Art Museum Visit", "Culture", 180, "Art Museum", "Explore art and culture"),
    ("Pottery Class", "Arts", 150, "Art Studio", "Create pottery together"),
    ("Open Mic Night", "Culture", 120, "Coffee Shop or Venue", "Share talents or enjoy performances"),
    ("Book Club Meeting", "Culture", 90, "Library or Cafe", "Discuss books and literature"),
    // Community & social
    ("Volunteer Work", "Community", 180, "Local Organization", "Give back to the community"),
    ("Farmers Market Visit", "Community", 120, "Farmers Market", "Shop for fresh local produce"),
    ("Campus Event", "Social", 120, "Campus", "Attend university events together"),
    ("Thrift Shopping", "Shopping", 150, "Thrift Stores", "Find unique vintage items"),
];

pub fn catalog() -> Vec<Activity> {
    CATALOG
        .iter()
        .map(|&(name, category, duration, location, description)| Activity {
            name: name.to_string(),
            category: category.to_string(),
            duration,
            location: location.to_string(),
            description: description.to_string(),
        })
        .collect()
}
