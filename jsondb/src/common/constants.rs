// doc constants
pub const DOC_ID: &str = "_id";

// id generation constants
pub const DEFAULT_ID_LENGTH: usize = 16;
pub const MAX_ID_ATTEMPTS: usize = 1_000_000;

// query combinators
pub const OP_AND: &str = "$and";
pub const OP_OR: &str = "$or";
pub const OP_NOT: &str = "$not";
pub const OP_WHERE: &str = "$where";

// query operators
pub const OP_EXISTS: &str = "$exists";
pub const OP_EQ: &str = "$eq";
pub const OP_NE: &str = "$ne";
pub const OP_LT: &str = "$lt";
pub const OP_LTE: &str = "$lte";
pub const OP_GT: &str = "$gt";
pub const OP_GTE: &str = "$gte";
pub const OP_IN: &str = "$in";
pub const OP_NIN: &str = "$nin";
pub const OP_INCLUDES: &str = "$includes";
pub const OP_TYPE: &str = "$type";
pub const OP_REGEX: &str = "$regex";

// update operators
pub const OP_INC: &str = "$inc";
pub const OP_PUSH: &str = "$push";
pub const OP_RENAME: &str = "$rename";
pub const OP_SET: &str = "$set";
pub const OP_UNSET: &str = "$unset";

// `$type` name of a field that is not present
pub const TYPE_UNDEFINED: &str = "undefined";
