/// FNV-1a偏移基准
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a质数
const FNV_PRIME: u32 = 16_777_619;

/// 对整个字节串计算32位FNV-1a哈希
pub fn fnv1a(input: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// 根据identity确定起始分片下标
///
/// 纯函数：同一identity加同一池大小永远得到同一下标，让同一调用方
/// 的消息尽量落在同一端点上。调用方负责保证pool_size至少为1。
pub fn select_shard(identity: &str, pool_size: usize) -> usize {
    fnv1a(identity) as usize % pool_size
}
