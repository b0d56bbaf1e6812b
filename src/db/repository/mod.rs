mod characters;

pub use characters::CharacterRepository;
