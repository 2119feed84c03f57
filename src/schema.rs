table! {
    comments (rowid) {
        rowid -> BigInt,
        id -> Text,
        option -> Text,
        nickname -> Text,
        comment -> Text,
        created -> BigInt,
    }
}
