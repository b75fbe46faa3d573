//! Account addresses shared by the test suites.
//!
//! The values are opaque to the module; they only need to be distinct.

pub const ALICE: &str = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";
pub const BOB: &str = "cosmos1xyxs3skf3f4jfqeuv89yyaqvjc6lffavxqhc8g";
pub const CAROL: &str = "cosmos1e0w5t53nrq7p66fye6c8p0ynyhf6y24l4yuxd7";
pub const DAVE: &str = "cosmos1tm6gk5dj4ydd6jq7a9mxcqnhxn94ys2q60ut7l";

/// Every test account, in a stable order.
pub const ALL: [&str; 4] = [ALICE, BOB, CAROL, DAVE];
