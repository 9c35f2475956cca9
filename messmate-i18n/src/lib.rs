#[cfg(all(feature = "bn", feature = "en"))]
compile_error!("Cannot enable both 'bn' and 'en' features at the same time");

#[cfg(feature = "bn")]
pub mod strings {
    pub const CURRENCY: &str = "৳";
    pub const MEMBER: &str = "সদস্য";
    pub const MEALS: &str = "মিল";
    pub const DEPOSITED: &str = "জমা";
    pub const MEAL_COST: &str = "মিল খরচ";
    pub const BALANCE: &str = "ব্যালেন্স";
    pub const MEAL_RATE: &str = "মিল রেট";
    pub const TOTAL_MEAL_UNITS: &str = "মোট মিল";
    pub const TOTAL_BAZAAR_SPEND: &str = "মোট বাজার খরচ";
    pub const TOTAL_DEPOSITS: &str = "মোট জমা";
    pub const REMAINING_BALANCE: &str = "অবশিষ্ট ব্যালেন্স";
    pub const EXPENSES_RECORDED: &str = "বাজার এন্ট্রি";
    pub const DEPOSITS_RECORDED: &str = "জমা এন্ট্রি";
    pub const MEMBERS: &str = "সদস্য সংখ্যা";
    pub const AVERAGE_MEALS_PER_MEMBER: &str = "সদস্য প্রতি গড় মিল";
    pub const SHARE: &str = "অংশ";
    pub const COST_SHARE: &str = "খরচের ভাগ";
    pub const ORPHANED_ENTRIES: &str = "অজ্ঞাত সদস্যের এন্ট্রি";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const CURRENCY: &str = "৳";
    pub const MEMBER: &str = "Member";
    pub const MEALS: &str = "Meals";
    pub const DEPOSITED: &str = "Deposited";
    pub const MEAL_COST: &str = "Meal Cost";
    pub const BALANCE: &str = "Balance";
    pub const MEAL_RATE: &str = "Meal Rate";
    pub const TOTAL_MEAL_UNITS: &str = "Total Meals";
    pub const TOTAL_BAZAAR_SPEND: &str = "Total Bazaar Cost";
    pub const TOTAL_DEPOSITS: &str = "Total Deposits";
    pub const REMAINING_BALANCE: &str = "Remaining Balance";
    pub const EXPENSES_RECORDED: &str = "Bazaar Entries";
    pub const DEPOSITS_RECORDED: &str = "Deposit Entries";
    pub const MEMBERS: &str = "Members";
    pub const AVERAGE_MEALS_PER_MEMBER: &str = "Avg Meals per Member";
    pub const SHARE: &str = "Share";
    pub const COST_SHARE: &str = "Cost Share";
    pub const ORPHANED_ENTRIES: &str = "Entries for unknown members";
}

#[cfg(not(any(feature = "bn", feature = "en")))]
pub mod strings {
    pub const CURRENCY: &str = "৳";
    pub const MEMBER: &str = "Member";
    pub const MEALS: &str = "Meals";
    pub const DEPOSITED: &str = "Deposited";
    pub const MEAL_COST: &str = "Meal Cost";
    pub const BALANCE: &str = "Balance";
    pub const MEAL_RATE: &str = "Meal Rate";
    pub const TOTAL_MEAL_UNITS: &str = "Total Meals";
    pub const TOTAL_BAZAAR_SPEND: &str = "Total Bazaar Cost";
    pub const TOTAL_DEPOSITS: &str = "Total Deposits";
    pub const REMAINING_BALANCE: &str = "Remaining Balance";
    pub const EXPENSES_RECORDED: &str = "Bazaar Entries";
    pub const DEPOSITS_RECORDED: &str = "Deposit Entries";
    pub const MEMBERS: &str = "Members";
    pub const AVERAGE_MEALS_PER_MEMBER: &str = "Avg Meals per Member";
    pub const SHARE: &str = "Share";
    pub const COST_SHARE: &str = "Cost Share";
    pub const ORPHANED_ENTRIES: &str = "Entries for unknown members";
}

pub use strings::*;
