use crate::error::{CollatorError, Result};

pub use service::CollationService;

mod service;

/// дескриптор: индекс ячейки (младшие 32 бита) и её поколение (старшие 32 бита)
pub type Handle = u64;

struct Slot<T>
{
    generation: u32,
    value: Option<T>,
}

/// таблица объектов, доступных по дескрипторам
///
/// освобождённые ячейки используются повторно с новым поколением, поэтому старый дескриптор
/// не может указать на новый объект
pub struct HandleTable<T>
{
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    /// название объектов - для сообщений об ошибках
    kind: &'static str,
}

impl<T> HandleTable<T>
{
    pub fn new(kind: &'static str) -> Self
    {
        Self {
            slots: vec![],
            free: vec![],
            kind,
        }
    }

    #[inline(always)]
    fn split(handle: Handle) -> (usize, u32)
    {
        ((handle & 0xFFFF_FFFF) as usize, (handle >> 32) as u32)
    }

    #[inline(always)]
    fn unbound(&self, handle: Handle) -> CollatorError
    {
        CollatorError::UnboundResource {
            kind: self.kind,
            handle,
        }
    }

    /// разместить объект
    pub fn insert(&mut self, value: T) -> Handle
    {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 1,
                    value: None,
                });

                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);

        ((slot.generation as u64) << 32) | index as u64
    }

    pub fn get(&self, handle: Handle) -> Result<&T>
    {
        let (index, generation) = Self::split(handle);

        match self.slots.get(index) {
            Some(Slot {
                generation: current,
                value: Some(value),
            }) if *current == generation => Ok(value),
            _ => Err(self.unbound(handle)),
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T>
    {
        let (index, generation) = Self::split(handle);
        let error = self.unbound(handle);

        match self.slots.get_mut(index) {
            Some(Slot {
                generation: current,
                value: Some(value),
            }) if *current == generation => Ok(value),
            _ => Err(error),
        }
    }

    /// удалить объект; дескриптор становится недействительным
    pub fn remove(&mut self, handle: Handle) -> Result<T>
    {
        let (index, generation) = Self::split(handle);
        let error = self.unbound(handle);

        let slot = match self.slots.get_mut(index) {
            Some(slot) if slot.generation == generation && slot.value.is_some() => slot,
            _ => return Err(error),
        };

        let value = slot.value.take().ok_or(error)?;

        slot.generation = slot.generation.wrapping_add(1).max(1);
        self.free.push(index as u32);

        Ok(value)
    }

    /// количество размещённых объектов
    pub fn len(&self) -> usize
    {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}
