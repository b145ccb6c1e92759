use mongodb::bson::oid::ObjectId;

/// A stored resource that belongs to a single user.
pub trait Owned {
    /// Lowercase resource name used in error messages
    const KIND: &'static str;

    fn id(&self) -> Option<ObjectId>;

    /// Id of the user who created the resource
    fn owner(&self) -> ObjectId;

    fn id_hex(&self) -> String {
        self.id().map(|id| id.to_hex()).unwrap_or_default()
    }
}
