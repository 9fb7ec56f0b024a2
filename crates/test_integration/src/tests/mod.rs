pub mod test_album;
pub mod test_photos;
