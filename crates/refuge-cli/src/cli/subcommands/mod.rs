mod family;

pub use family::FamilyCommands;
