pub const CONTAINER: &str = "max-w-md mx-auto px-4 py-6";
pub const NAV: &str = "sticky top-0 z-50 w-full bg-gray-900/80 backdrop-blur-md border-b border-gray-700/50";
pub const NAV_BRAND: &str = "flex items-center text-xl font-bold text-white hover:text-yellow-400 transition-colors duration-200";
pub const NAV_ITEMS: &str = "flex items-center space-x-3";
pub const NAV_LINK: &str = "px-2 py-1 text-sm font-medium text-gray-300 hover:text-yellow-400 transition-colors duration-200";
pub const BALANCE_PILL: &str = "flex items-center space-x-2 px-3 py-1 bg-gray-800 rounded-lg text-sm font-medium text-yellow-300";
pub const CARD: &str = "bg-gray-800 rounded-xl shadow-lg p-5";
pub const CARD_HOVER: &str = "bg-gray-800 rounded-xl shadow-lg p-5 hover:shadow-xl transform hover:-translate-y-1 transition-all duration-300 cursor-pointer";
pub const BUTTON_PRIMARY: &str = "w-full px-6 py-3 rounded-full font-bold text-lg text-white bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 shadow-lg transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "px-3 py-2 rounded-lg font-medium border border-gray-600 text-white hover:bg-gray-700 disabled:opacity-40";
pub const BUTTON_SMALL: &str = "px-3 py-1 rounded-lg text-xs font-semibold text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-40";
pub const SELECT: &str = "bg-gray-700 rounded-xl p-2 text-sm text-white";
pub const INPUT: &str = "block w-full rounded-lg bg-gray-900 py-2 px-3 text-white ring-1 ring-inset ring-gray-700 placeholder:text-gray-500 focus:ring-2 focus:ring-yellow-500";
pub const TEXT_H2: &str = "text-2xl font-bold text-white";
pub const TEXT_BODY: &str = "text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-400";
pub const ALERT_ERROR: &str = "bg-red-900/50 border border-red-800 rounded-lg p-3 text-red-200 text-sm";
pub const ALERT_SUCCESS: &str = "bg-green-900/50 border border-green-800 rounded-lg p-3 text-green-200 text-sm";
pub const ALERT_INFO: &str = "bg-blue-900/50 border border-blue-800 rounded-lg p-3 text-blue-200 text-sm";
