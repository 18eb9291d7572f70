// Contract call bindings
// ABI declarations for the ERC-20 approve call and the THORChain/Mayachain
// EVM router deposit
//
// Numan Thabit 2025 Nov

use alloy_sol_types::sol;

sol! {
    interface IERC20 {
        function approve(address spender, uint256 value) external returns (bool);
    }
}

sol! {
    interface IThorRouter {
        function depositWithExpiry(
            address vault,
            address asset,
            uint256 amount,
            string memo,
            uint256 expiration
        ) external payable;
    }
}
